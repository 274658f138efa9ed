// Participant and company models consumed by the split workflow.

use serde::{Deserialize, Serialize};

/// Individual traveller or counterpart attached to a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: Option<i64>,
    pub trip_id: i64,
    pub name: String,
    pub email: Option<String>,
}

/// Exporter, cooperative or other company visited during a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub id: Option<i64>,
    pub trip_id: i64,
    pub name: String,
    pub city: Option<String>,
}

/// Reference to either kind of attendee, as assigned in the split dialog.
/// Serialized into activity notes when a split is recorded, so the stored
/// JSON form is part of the database contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum AttendeeRef {
    Company(i64),
    Participant(i64),
}

/// Flattened attendee list shown in the split dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendeeItem {
    pub reference: AttendeeRef,
    pub name: String,
}

impl AttendeeItem {
    pub fn roster(companies: &[Company], participants: &[Participant]) -> Vec<AttendeeItem> {
        let mut items = Vec::with_capacity(companies.len() + participants.len());
        for company in companies {
            if let Some(id) = company.id {
                items.push(AttendeeItem {
                    reference: AttendeeRef::Company(id),
                    name: company.name.clone(),
                });
            }
        }
        for participant in participants {
            if let Some(id) = participant.id {
                items.push(AttendeeItem {
                    reference: AttendeeRef::Participant(id),
                    name: participant.name.clone(),
                });
            }
        }
        items
    }
}
