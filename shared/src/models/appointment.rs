//! Appointment Model
//!
//! One client engagement, progressing through the session fulfillment
//! lifecycle. The status chain is strictly ordered; the only branch is the
//! terminal `Cancelled` state. The transition table lives here, on the enum,
//! so every caller checks the same rules.

use serde::{Deserialize, Serialize};

/// Appointment lifecycle status
///
/// Ordered chain, no skipping:
/// `Pending → Confirmed → SessionDone → Editing → AwaitingSelection
///  → FinalEditing → Delivered`, with `Cancelled` reachable from every
/// non-delivered state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    SessionDone,
    Editing,
    AwaitingSelection,
    FinalEditing,
    Delivered,
    Cancelled,
}

impl AppointmentStatus {
    /// Position in the ordered chain (`Cancelled` has none).
    pub fn chain_index(self) -> Option<usize> {
        match self {
            Self::Pending => Some(0),
            Self::Confirmed => Some(1),
            Self::SessionDone => Some(2),
            Self::Editing => Some(3),
            Self::AwaitingSelection => Some(4),
            Self::FinalEditing => Some(5),
            Self::Delivered => Some(6),
            Self::Cancelled => None,
        }
    }

    /// Whether `self → next` is a step of the ordered chain (cancellation
    /// excluded). The single source of truth for forward movement.
    pub fn is_next_in_chain(self, next: Self) -> bool {
        match (self.chain_index(), next.chain_index()) {
            (Some(a), Some(b)) => b == a + 1,
            _ => false,
        }
    }

    /// Whether an admin `update_status` call may request `self → next`.
    ///
    /// Two edges are carved out of the chain:
    /// - `AwaitingSelection → FinalEditing` belongs to the approval gate,
    ///   never to a direct admin call;
    /// - `→ Cancelled` is allowed from every state except `Delivered`.
    pub fn admin_can_transition(self, next: Self) -> bool {
        if next == Self::Cancelled {
            return self != Self::Delivered && self != Self::Cancelled;
        }
        if self == Self::AwaitingSelection && next == Self::FinalEditing {
            return false;
        }
        self.is_next_in_chain(next)
    }

    /// Terminal states accept no further transition.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

/// Appointment payment status (separate from order reconciliation;
/// tracks the engagement's own invoice)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum AppointmentPaymentStatus {
    #[default]
    Unpaid,
    Partial,
    Paid,
}

/// Appointment entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Appointment {
    pub id: i64,
    pub tenant_id: i64,
    pub service_id: i64,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub scheduled_at: i64,
    pub status: AppointmentStatus,
    pub final_price: f64,
    pub paid_amount: f64,
    pub payment_status: AppointmentPaymentStatus,
    pub payment_method: Option<String>,
    pub paid_at: Option<i64>,
    pub selection_approved: bool,
    pub selection_approved_at: Option<i64>,
    pub share_slug: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create appointment payload (booking request)
#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentCreate {
    pub service_id: i64,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub scheduled_at: i64,
    pub notes: Option<String>,
}

/// Admin status change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentStatusUpdate {
    pub status: AppointmentStatus,
}

/// Client approval payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveSelectionRequest {
    pub client_email: String,
}

#[cfg(test)]
mod tests {
    use super::AppointmentStatus::*;

    #[test]
    fn chain_admits_only_single_steps() {
        assert!(Pending.admin_can_transition(Confirmed));
        assert!(Confirmed.admin_can_transition(SessionDone));
        assert!(SessionDone.admin_can_transition(Editing));
        assert!(Editing.admin_can_transition(AwaitingSelection));
        assert!(FinalEditing.admin_can_transition(Delivered));

        // No skipping
        assert!(!Pending.admin_can_transition(SessionDone));
        assert!(!Confirmed.admin_can_transition(Editing));
        // No backward movement
        assert!(!Editing.admin_can_transition(SessionDone));
        assert!(!Delivered.admin_can_transition(FinalEditing));
    }

    #[test]
    fn approval_edge_is_reserved_for_the_gate() {
        assert!(AwaitingSelection.is_next_in_chain(FinalEditing));
        assert!(!AwaitingSelection.admin_can_transition(FinalEditing));
    }

    #[test]
    fn cancellation_reachable_from_everything_but_delivered() {
        for s in [
            Pending,
            Confirmed,
            SessionDone,
            Editing,
            AwaitingSelection,
            FinalEditing,
        ] {
            assert!(s.admin_can_transition(Cancelled), "{s:?} should cancel");
        }
        assert!(!Delivered.admin_can_transition(Cancelled));
        assert!(!Cancelled.admin_can_transition(Cancelled));
    }

    #[test]
    fn terminal_states() {
        assert!(Delivered.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!FinalEditing.is_terminal());
    }

    #[test]
    fn wire_format_is_screaming_snake() {
        let json = serde_json::to_string(&AwaitingSelection).unwrap();
        assert_eq!(json, "\"AWAITING_SELECTION\"");
        let back: super::AppointmentStatus =
            serde_json::from_str("\"SESSION_DONE\"").unwrap();
        assert_eq!(back, SessionDone);
    }
}
