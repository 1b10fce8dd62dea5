//! Outcome routing.
//!
//! A fixed table from [`UrgencyTier`] to the ordered actions offered on the result screen. The
//! router only describes actions; navigating is left to whoever renders them.

use intake_types::UrgencyTier;
use serde::Serialize;

/// Headline message shown with a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Messaging {
    Urgent,
    ScheduleSoon,
    Reassurance,
}

impl Messaging {
    pub fn text(self) -> &'static str {
        match self {
            Messaging::Urgent => {
                "Your symptoms suggest urgent medical attention. Please seek immediate care."
            }
            Messaging::ScheduleSoon => "We recommend scheduling a consultation soon.",
            Messaging::Reassurance => {
                "Your symptoms appear manageable. Monitor and consult if they persist."
            }
        }
    }
}

/// Where a navigating action leads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// Hospital and emergency-care availability.
    EmergencyCare,
    /// Clinician listing for booking.
    Clinicians,
}

impl Destination {
    pub fn path(self) -> &'static str {
        match self {
            Destination::EmergencyCare => "/hospitals",
            Destination::Clinicians => "/doctors",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "messaging")]
pub enum Action {
    Present(Messaging),
    FindEmergencyCare,
    BookUrgentAppointment,
    BookAppointment,
    Restart,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Present(messaging) => messaging.text(),
            Action::FindEmergencyCare => "Find Emergency Care",
            Action::BookUrgentAppointment => "Book Urgent Appointment",
            Action::BookAppointment => "Book Appointment",
            Action::Restart => "Start Over",
        }
    }

    pub fn destination(self) -> Option<Destination> {
        match self {
            Action::FindEmergencyCare => Some(Destination::EmergencyCare),
            Action::BookUrgentAppointment | Action::BookAppointment => {
                Some(Destination::Clinicians)
            }
            Action::Present(_) | Action::Restart => None,
        }
    }
}

const HIGH_ACTIONS: &[Action] = &[
    Action::Present(Messaging::Urgent),
    Action::FindEmergencyCare,
    Action::BookUrgentAppointment,
    Action::Restart,
];

const MEDIUM_ACTIONS: &[Action] = &[
    Action::Present(Messaging::ScheduleSoon),
    Action::BookAppointment,
    Action::Restart,
];

const LOW_ACTIONS: &[Action] = &[
    Action::Present(Messaging::Reassurance),
    Action::BookAppointment,
    Action::Restart,
];

/// Ordered actions for `tier`.
pub fn actions_for(tier: UrgencyTier) -> &'static [Action] {
    match tier {
        UrgencyTier::High => HIGH_ACTIONS,
        UrgencyTier::Medium => MEDIUM_ACTIONS,
        UrgencyTier::Low => LOW_ACTIONS,
    }
}

/// What the presentation layer receives: the tier and its actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub tier: UrgencyTier,
    pub actions: &'static [Action],
}

impl Outcome {
    pub fn for_tier(tier: UrgencyTier) -> Self {
        Self {
            tier,
            actions: actions_for(tier),
        }
    }

    pub fn messaging(&self) -> Option<Messaging> {
        self.actions.iter().find_map(|action| match action {
            Action::Present(messaging) => Some(*messaging),
            _ => None,
        })
    }

    /// High-tier results are shown with emphasis.
    pub fn is_urgent(&self) -> bool {
        self.tier == UrgencyTier::High
    }
}
