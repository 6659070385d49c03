// SPDX-License-Identifier: MPL-2.0

#![allow(dead_code)]

pub const APP_NAME: &str = "Gantry";

/// Path prefixes of the hosted backend. Every deployment has its own base
/// URL; these suffixes are fixed by the service.
pub const REST_PATH: &str = "rest/v1";
pub const AUTH_PATH: &str = "auth/v1";

/// Stored procedure that flips a pending edge to accepted and writes the
/// reciprocal edge in the same transaction.
pub const ACCEPT_PROCEDURE: &str = "accept_connection";
