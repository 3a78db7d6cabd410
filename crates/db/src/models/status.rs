//! Status helper enums mapping to SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr => $label:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Resolve a database status ID back to the enum.
            pub fn from_id(id: StatusId) -> Option<Self> {
                [$( Self::$variant ),+].into_iter().find(|v| v.id() == id)
            }

            /// Display label shown in lists and exports.
            pub fn label(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Incident lifecycle status. Transitions are deliberately
    /// unconstrained: any status may follow any other.
    IncidentStatus {
        Open = 1 => "Abierta",
        InProgress = 2 => "En proceso",
        Closed = 3 => "Cerrada",
    }
}

define_status_enum! {
    /// Work-plan activity status.
    ActivityStatus {
        Planned = 1 => "Planeada",
        Executed = 2 => "Ejecutada",
    }
}

define_status_enum! {
    /// Training session status.
    TrainingStatus {
        Planned = 1 => "Planeada",
        Completed = 2 => "Completada",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_seed_order() {
        assert_eq!(IncidentStatus::Open.id(), 1);
        assert_eq!(IncidentStatus::InProgress.id(), 2);
        assert_eq!(IncidentStatus::Closed.id(), 3);
        assert_eq!(ActivityStatus::Executed.id(), 2);
    }

    #[test]
    fn from_id_round_trips() {
        assert_eq!(IncidentStatus::from_id(2), Some(IncidentStatus::InProgress));
        assert_eq!(IncidentStatus::from_id(9), None);
        assert_eq!(ActivityStatus::from_id(1), Some(ActivityStatus::Planned));
    }

    #[test]
    fn labels_are_display_ready() {
        assert_eq!(IncidentStatus::InProgress.label(), "En proceso");
        assert_eq!(TrainingStatus::Completed.label(), "Completada");
    }
}
