//! Logbook service
//!
//! Turns a validated trip into the legs that get submitted. A return trip
//! is logged once by the user and split into an outbound and an inbound leg.

use crate::models::{LogbookErrors, TripLeg};

/// The two legs of a split return trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnTrip {
    /// Outbound leg, origin to destination
    pub first: TripLeg,
    /// Inbound leg, destination back to origin
    pub second: TripLeg,
}

impl ReturnTrip {
    pub fn into_legs(self) -> Vec<TripLeg> {
        vec![self.first, self.second]
    }
}

/// Split a round trip into two legs of about half the distance each
///
/// The outbound leg takes the extra kilometre of an odd distance and keeps
/// the refuelled litres; the inbound leg swaps origin and destination.
/// The first leg ends where the second starts, and the two driven
/// distances add up to the original.
pub fn split_return_trip(leg: &TripLeg) -> ReturnTrip {
    let leg_kilometres = leg.driven_kilometres.div_euclid(2);
    let first_kilometres = leg.driven_kilometres - leg_kilometres;
    let first_end_kilometres = leg.start_kilometres.saturating_add(first_kilometres);

    let first = TripLeg {
        end_kilometres: first_end_kilometres,
        driven_kilometres: first_kilometres,
        ..leg.clone()
    };

    let second = TripLeg {
        start_kilometres: first_end_kilometres,
        driven_kilometres: leg_kilometres,
        origin: leg.destination.clone(),
        destination: leg.origin.clone(),
        litres_refuelled: None,
        ..leg.clone()
    };

    ReturnTrip { first, second }
}

/// Service for preparing logbook submissions
#[derive(Debug, Default)]
pub struct LogbookService;

impl LogbookService {
    pub fn new() -> Self {
        Self
    }

    /// Validate a trip and return the legs to submit
    ///
    /// Each returned leg is an independent create; a return trip yields two.
    pub fn prepare(&self, leg: &TripLeg, return_trip: bool) -> Result<Vec<TripLeg>, LogbookErrors> {
        leg.validate()?;

        if return_trip {
            Ok(split_return_trip(leg).into_legs())
        } else {
            Ok(vec![leg.clone()])
        }
    }
}
