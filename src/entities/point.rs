use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;
use crate::sdk::MarkerHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Start,
    End,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Start, Role::End];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A placed endpoint always carries the marker drawn for it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub coordinates: Coordinates,
    pub marker: MarkerHandle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub role: Role,
    placement: Option<Placement>,
}

impl Point {
    fn new(role: Role) -> Self {
        Self {
            role,
            placement: None,
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.placement.map(|p| p.coordinates)
    }

    pub fn marker(&self) -> Option<MarkerHandle> {
        self.placement.map(|p| p.marker)
    }

    pub fn is_set(&self) -> bool {
        self.placement.is_some()
    }

    /// Returns the previous placement so its marker can be removed.
    pub fn place(&mut self, coordinates: Coordinates, marker: MarkerHandle) -> Option<Placement> {
        self.placement.replace(Placement {
            coordinates,
            marker,
        })
    }

    pub fn clear(&mut self) -> Option<Placement> {
        self.placement.take()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Points {
    start: Point,
    end: Point,
}

impl Default for Points {
    fn default() -> Self {
        Self {
            start: Point::new(Role::Start),
            end: Point::new(Role::End),
        }
    }
}

impl Points {
    pub fn get(&self, role: Role) -> &Point {
        match role {
            Role::Start => &self.start,
            Role::End => &self.end,
        }
    }

    pub fn get_mut(&mut self, role: Role) -> &mut Point {
        match role {
            Role::Start => &mut self.start,
            Role::End => &mut self.end,
        }
    }

    pub fn count_set(&self) -> usize {
        Role::ALL.iter().filter(|role| self.get(**role).is_set()).count()
    }

    /// Both endpoints as `(start, end)` when both are set.
    pub fn endpoints(&self) -> Option<(Coordinates, Coordinates)> {
        Some((self.start.coordinates()?, self.end.coordinates()?))
    }
}

#[test]
fn points_are_addressed_by_role() {
    let mut points = Points::default();
    assert_eq!(points.get(Role::Start).role, Role::Start);
    assert_eq!(points.get(Role::End).role, Role::End);
    assert_eq!(points.count_set(), 0);

    let marker = MarkerHandle::new();
    let previous = points
        .get_mut(Role::End)
        .place(Coordinates::new(35.2, 126.9), marker);

    assert_eq!(previous, None);
    assert_eq!(points.count_set(), 1);
    assert_eq!(points.get(Role::End).marker(), Some(marker));
    assert!(!points.get(Role::Start).is_set());
    assert_eq!(points.endpoints(), None);
}

#[test]
fn replacing_a_placement_returns_the_old_marker() {
    let mut points = Points::default();
    let first = MarkerHandle::new();
    let second = MarkerHandle::new();

    let point = points.get_mut(Role::Start);
    point.place(Coordinates::new(35.1, 126.8), first);
    let previous = point.place(Coordinates::new(35.3, 126.7), second);

    assert_eq!(previous.map(|p| p.marker), Some(first));
    assert_eq!(point.coordinates(), Some(Coordinates::new(35.3, 126.7)));

    let cleared = point.clear();
    assert_eq!(cleared.map(|p| p.marker), Some(second));
    assert_eq!(point.marker(), None);
    assert_eq!(point.coordinates(), None);
}
