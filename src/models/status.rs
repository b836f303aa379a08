//! Invoice status enumerations.
//!
//! Every enum has a fallback variant so a value the server introduces later
//! still decodes; it is written back unchanged.

use serde::{Deserialize, Serialize};

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// A value this crate does not know about.
            Other(String),
        }

        impl $name {
            /// The wire string for this value.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Other(s) => s.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($wire => Self::$variant,)+
                    _ => Self::Other(value),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(s) => s,
                    other => other.as_str().to_string(),
                }
            }
        }
    };
}

macro_rules! int_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "i64", into = "i64")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// A value this crate does not know about.
            Other(i64),
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                match value {
                    $($wire => Self::$variant,)+
                    _ => Self::Other(value),
                }
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                match value {
                    $($name::$variant => $wire,)+
                    $name::Other(n) => n,
                }
            }
        }
    };
}

int_enum! {
    /// Invoice status (`status`).
    InvoiceStatus {
        Disputed => 0,
        Draft => 1,
        Sent => 2,
        Viewed => 3,
        Paid => 4,
        AutoPaid => 5,
        Retry => 6,
        Failed => 7,
        Partial => 8,
    }
}

int_enum! {
    /// Visibility of a record (`vis_state`).
    VisState {
        Active => 0,
        Deleted => 1,
        Archived => 2,
    }
}

string_enum! {
    /// Payment status (`payment_status`).
    PaymentStatus {
        Unpaid => "unpaid",
        Partial => "partial",
        Paid => "paid",
        AutoPaid => "auto-paid",
    }
}

string_enum! {
    /// Status shown in the FreshBooks UI (`display_status`).
    DisplayStatus {
        Draft => "draft",
        Created => "created",
        Sent => "sent",
        Viewed => "viewed",
        Outstanding => "outstanding",
        Paid => "paid",
        Partial => "partial",
        Disputed => "disputed",
    }
}

string_enum! {
    /// Status of an automatic payment attempt (`autobill_status`).
    AutoBillStatus {
        Retry => "retry",
        Failed => "failed",
        Success => "success",
    }
}

string_enum! {
    /// Deposit status (`deposit_status`).
    DepositStatus {
        None => "none",
        Paid => "paid",
        Unpaid => "unpaid",
        Partial => "partial",
        Converted => "converted",
    }
}

string_enum! {
    /// Detailed invoice status (`v3_status`).
    InvoiceV3Status {
        Created => "created",
        Draft => "draft",
        Sent => "sent",
        Viewed => "viewed",
        Failed => "failed",
        Retry => "retry",
        Success => "success",
        AutoPaid => "autopaid",
        Paid => "paid",
        Partial => "partial",
        Disputed => "disputed",
        Resolved => "resolved",
        Overdue => "overdue",
        DepositPartial => "deposit-partial",
        DepositPaid => "deposit-paid",
        Declined => "declined",
        Pending => "pending",
    }
}
