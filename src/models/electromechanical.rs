//! Electromechanical systems models.
//!
//! This module contains models for electric machines and their drives.

pub mod bldc;
