//! Typed row identifiers
//!
//! Every table keys on a UUID. Each entity gets its own newtype so a
//! `RevenueId` cannot be handed to a query expecting a `ClientId`. On the
//! wire the ids are bare UUID strings; `Display` adds a short label for logs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! typed_ids {
    ($($(#[$meta:meta])* $name:ident => $label:literal;)+) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Label shown in front of the UUID by `Display`
            pub const LABEL: &'static str = $label;

            /// Random (v4) id
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Time-ordered (v7) id, used for rows created by the API
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", Self::LABEL, self.0)
            }
        }

        /// Accepts both the labelled form and a bare UUID
        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .strip_prefix(Self::LABEL)
                    .and_then(|rest| rest.strip_prefix('-'))
                    .unwrap_or(s);
                Uuid::parse_str(raw).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    )+};
}

typed_ids! {
    /// Owner of every row; the `sub` of the auth token
    UserId => "USR";

    AccountId => "ACC";
    RevenueId => "REV";
    ExpenseId => "EXP";
    TransferId => "TRF";
    InvestmentId => "INV";

    ClientId => "CLI";
    /// Sales pipeline entry
    DealId => "DEAL";

    GoalId => "GOAL";
    TaskId => "TASK";
    HabitId => "HAB";
    WaterLogId => "H2O";

    /// Acquisition channel of the catalog
    ChannelId => "CHN";
    /// Service offered to clients
    ServiceId => "SRV";
}
