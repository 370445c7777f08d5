//! Customer and group information
//!
//! The form provider hands over raw strings ([`PartyForm`]); they are parsed
//! into a [`PartyInfo`], which is validated again against the selection
//! right before a booking is committed.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_AGE, MAX_GROUP_SIZE, MIN_AGE};
use crate::error::{BookingError, Result};
use crate::seats::SeatId;

/// One row of the group member form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberForm {
    pub name: String,
    pub age: String,
}

/// Raw form values, exactly as typed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PartyForm {
    /// No ticket type chosen
    #[default]
    Unselected,
    Individual {
        name: String,
        age: String,
    },
    Group {
        size: String,
        members: Vec<MemberForm>,
    },
}

fn parse_age(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn parse_group_size(raw: &str) -> Result<usize> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=MAX_GROUP_SIZE).contains(n))
        .ok_or(BookingError::InvalidGroupSize { max: MAX_GROUP_SIZE })
}

impl PartyForm {
    /// Parse the form into party info
    ///
    /// Only structural problems are reported here (blank fields, numbers
    /// that don't parse); ranges are checked by [`PartyInfo::validate`].
    pub fn parse(&self) -> Result<PartyInfo> {
        match self {
            PartyForm::Unselected => Err(BookingError::MissingTicketType),
            PartyForm::Individual { name, age } => {
                if name.trim().is_empty() {
                    return Err(BookingError::MissingName);
                }
                let age = parse_age(age).ok_or(BookingError::InvalidAge)?;
                Ok(PartyInfo::Individual {
                    name: name.trim().to_string(),
                    age,
                })
            }
            PartyForm::Group { size, members } => {
                let seat_count = parse_group_size(size)?;
                if members.len() != seat_count {
                    return Err(BookingError::MemberCountMismatch {
                        declared: seat_count,
                        members: members.len(),
                    });
                }
                let members = members
                    .iter()
                    .enumerate()
                    .map(|(i, m)| {
                        if m.name.trim().is_empty() || m.age.trim().is_empty() {
                            return Err(BookingError::MemberIncomplete(i + 1));
                        }
                        let age = parse_age(&m.age).ok_or(BookingError::MemberInvalidAge(i + 1))?;
                        Ok(MemberInfo {
                            name: m.name.trim().to_string(),
                            age,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(PartyInfo::Group { members, seat_count })
            }
        }
    }

    /// Age used for individual auto-select
    pub fn individual_age(&self) -> Result<u32> {
        match self {
            PartyForm::Individual { age, .. } => parse_age(age)
                .and_then(|a| u32::try_from(a).ok())
                .ok_or(BookingError::InvalidAge),
            _ => Err(BookingError::MissingTicketType),
        }
    }

    /// Member ages used for group auto-select
    pub fn group_ages(&self) -> Result<Vec<u32>> {
        let PartyForm::Group { size, members } = self else {
            return Err(BookingError::MissingTicketType);
        };
        let declared = parse_group_size(size)?;
        if members.len() != declared {
            return Err(BookingError::MemberCountMismatch {
                declared,
                members: members.len(),
            });
        }
        members
            .iter()
            .enumerate()
            .map(|(i, m)| {
                parse_age(&m.age)
                    .and_then(|a| u32::try_from(a).ok())
                    .ok_or(BookingError::MemberInvalidAge(i + 1))
            })
            .collect()
    }
}

/// Name and age of one group member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub name: String,
    pub age: i64,
}

/// Parsed, not yet validated party information
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartyInfo {
    Individual { name: String, age: i64 },
    Group { members: Vec<MemberInfo>, seat_count: usize },
}

fn age_in_range(age: i64) -> bool {
    (MIN_AGE as i64..=MAX_AGE as i64).contains(&age)
}

impl PartyInfo {
    pub fn individual(name: impl Into<String>, age: i64) -> Self {
        PartyInfo::Individual {
            name: name.into(),
            age,
        }
    }

    /// Group whose declared seat count equals its member count
    pub fn group<S: Into<String>>(members: impl IntoIterator<Item = (S, i64)>) -> Self {
        let members: Vec<MemberInfo> = members
            .into_iter()
            .map(|(name, age)| MemberInfo {
                name: name.into(),
                age,
            })
            .collect();
        let seat_count = members.len();
        PartyInfo::Group { members, seat_count }
    }

    /// Check the info against the number of selected seats
    pub fn validate(&self, selected: usize) -> Result<()> {
        match self {
            PartyInfo::Individual { name, age } => {
                if name.trim().is_empty() {
                    return Err(BookingError::MissingName);
                }
                if !age_in_range(*age) {
                    return Err(BookingError::InvalidAge);
                }
                Ok(())
            }
            PartyInfo::Group { members, seat_count } => {
                if !(1..=MAX_GROUP_SIZE).contains(seat_count) {
                    return Err(BookingError::InvalidGroupSize { max: MAX_GROUP_SIZE });
                }
                if members.len() != *seat_count {
                    return Err(BookingError::MemberCountMismatch {
                        declared: *seat_count,
                        members: members.len(),
                    });
                }
                if selected != *seat_count {
                    return Err(BookingError::SeatCountMismatch {
                        expected: *seat_count,
                        selected,
                    });
                }
                for (i, member) in members.iter().enumerate() {
                    if member.name.trim().is_empty() {
                        return Err(BookingError::MemberIncomplete(i + 1));
                    }
                    if !age_in_range(member.age) {
                        return Err(BookingError::MemberInvalidAge(i + 1));
                    }
                }
                Ok(())
            }
        }
    }

    /// Convert validated info into the persisted form
    ///
    /// Group member `i` is seated in `seats[i]`.
    pub fn to_party(&self, seats: &[SeatId]) -> Party {
        match self {
            PartyInfo::Individual { name, age } => Party::Individual {
                name: name.trim().to_string(),
                age: clamp_age(*age),
            },
            PartyInfo::Group { members, .. } => Party::Group {
                members: members
                    .iter()
                    .enumerate()
                    .map(|(i, m)| Member {
                        name: m.name.trim().to_string(),
                        age: clamp_age(m.age),
                        seat: seats.get(i).copied(),
                    })
                    .collect(),
            },
        }
    }
}

fn clamp_age(age: i64) -> u32 {
    age.clamp(MIN_AGE as i64, MAX_AGE as i64) as u32
}

/// Persisted group member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub age: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat: Option<SeatId>,
}

/// Persisted party details of a reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Party {
    Individual { name: String, age: u32 },
    Group { members: Vec<Member> },
}

impl Party {
    /// Move the members seated in `seats` into a new party
    ///
    /// An individual is copied, since one person can hold several seats.
    pub fn split_off(&mut self, seats: &[SeatId]) -> Party {
        match self {
            Party::Individual { .. } => self.clone(),
            Party::Group { members } => {
                let (moved, kept): (Vec<Member>, Vec<Member>) = members
                    .drain(..)
                    .partition(|m| m.seat.is_some_and(|s| seats.contains(&s)));
                *members = kept;
                Party::Group { members: moved }
            }
        }
    }
}
