//! End-to-end scenarios
//!
//! Whole-page journeys: load, act, refetch, and load again as another viewer.

pub mod participation_journey_test;
