//! In-memory owner of every activity and its roster.
//!
//! A single lock guards the whole map. Each operation holds it for its full
//! check-and-mutate sequence, so two concurrent signups can never both pass
//! the capacity check.

use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::database::seed;
use crate::error::{RegistryError, Result};
use crate::models::Activity;

/// Confirmation returned by a successful signup or unregister.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub activity: String,
    pub email: String,
}

#[derive(Debug)]
pub struct ActivityRegistry {
    activities: Mutex<IndexMap<String, Activity>>,
}

impl ActivityRegistry {
    /// Builds a registry from `(name, activity)` pairs. A later pair with an
    /// already seen name replaces the earlier one.
    pub fn new<I, S>(activities: I) -> Self
    where
        I: IntoIterator<Item = (S, Activity)>,
        S: Into<String>,
    {
        let activities = activities
            .into_iter()
            .map(|(name, activity)| (name.into(), activity))
            .collect();
        Self {
            activities: Mutex::new(activities),
        }
    }

    /// Registry holding the school's fixed activity catalog.
    pub fn seeded() -> Self {
        Self::new(seed::mergington_activities())
    }

    /// Snapshot of every activity, in seed order.
    pub fn list_activities(&self) -> IndexMap<String, Activity> {
        self.activities.lock().clone()
    }

    pub fn get_activity(&self, name: &str) -> Result<Activity> {
        self.activities
            .lock()
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::not_found(name))
    }

    /// Appends `email` to the roster of `activity_name`.
    ///
    /// Checks run in a fixed order: existence, then duplicate, then capacity.
    /// A request that is both a duplicate and aimed at a full activity is
    /// therefore reported as [`RegistryError::AlreadyRegistered`].
    pub fn signup(&self, activity_name: &str, email: &str) -> Result<Registration> {
        let mut activities = self.activities.lock();
        let activity = activities
            .get_mut(activity_name)
            .ok_or_else(|| RegistryError::not_found(activity_name))?;

        if activity.is_registered(email) {
            return Err(RegistryError::AlreadyRegistered {
                activity: activity_name.to_string(),
                email: email.to_string(),
            });
        }

        if activity.is_full() {
            return Err(RegistryError::ActivityFull {
                activity: activity_name.to_string(),
                max_participants: activity.max_participants,
            });
        }

        activity.participants.push(email.to_string());
        Ok(Registration {
            activity: activity_name.to_string(),
            email: email.to_string(),
        })
    }

    /// Removes the single roster entry matching `email`. The remaining
    /// participants keep their signup order.
    pub fn unregister(&self, activity_name: &str, email: &str) -> Result<Registration> {
        let mut activities = self.activities.lock();
        let activity = activities
            .get_mut(activity_name)
            .ok_or_else(|| RegistryError::not_found(activity_name))?;

        let Some(pos) = activity.participants.iter().position(|p| p == email) else {
            return Err(RegistryError::NotRegistered {
                activity: activity_name.to_string(),
                email: email.to_string(),
            });
        };

        activity.participants.remove(pos);
        Ok(Registration {
            activity: activity_name.to_string(),
            email: email.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use super::*;

    fn chess_only() -> ActivityRegistry {
        ActivityRegistry::new([(
            "Chess Club",
            Activity::new(
                "Learn strategies and compete in chess tournaments",
                "Fridays, 3:30 PM - 5:00 PM",
                12,
            ),
        )])
    }

    fn roster(registry: &ActivityRegistry, name: &str) -> Vec<String> {
        registry.get_activity(name).unwrap().participants
    }

    #[test]
    fn signup_appends_in_order() {
        let registry = chess_only();
        let ok = registry.signup("Chess Club", "a@mergington.edu").unwrap();
        registry.signup("Chess Club", "b@mergington.edu").unwrap();

        assert_eq!(ok.activity, "Chess Club");
        assert_eq!(ok.email, "a@mergington.edu");
        assert_eq!(
            roster(&registry, "Chess Club"),
            vec!["a@mergington.edu", "b@mergington.edu"]
        );
    }

    #[test]
    fn twelve_fit_and_the_thirteenth_is_rejected() {
        let registry = chess_only();
        for i in 0..12 {
            registry
                .signup("Chess Club", &format!("student{i}@mergington.edu"))
                .unwrap();
        }

        let err = registry
            .signup("Chess Club", "overflow@mergington.edu")
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::ActivityFull {
                activity: "Chess Club".into(),
                max_participants: 12,
            }
        );
        assert_eq!(roster(&registry, "Chess Club").len(), 12);
    }

    #[test]
    fn duplicate_signup_leaves_roster_alone() {
        let registry = chess_only();
        registry.signup("Chess Club", "dup@mergington.edu").unwrap();

        let err = registry.signup("Chess Club", "dup@mergington.edu").unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyRegistered { .. }));
        assert_eq!(roster(&registry, "Chess Club").len(), 1);
    }

    #[test]
    fn duplicate_wins_over_full() {
        let registry = ActivityRegistry::new([(
            "Tiny",
            Activity::new("one seat", "never", 1).with_participants(["only@mergington.edu"]),
        )]);

        let err = registry.signup("Tiny", "only@mergington.edu").unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyRegistered { .. }));

        let err = registry.signup("Tiny", "other@mergington.edu").unwrap_err();
        assert!(matches!(err, RegistryError::ActivityFull { .. }));
    }

    #[test]
    fn unknown_activity_is_not_found_for_every_operation() {
        let registry = chess_only();
        for email in ["", "x@mergington.edu"] {
            assert_eq!(
                registry.signup("Knitting", email).unwrap_err(),
                RegistryError::not_found("Knitting")
            );
            assert_eq!(
                registry.unregister("Knitting", email).unwrap_err(),
                RegistryError::not_found("Knitting")
            );
        }
        assert!(registry.get_activity("Knitting").is_err());
    }

    #[test]
    fn names_are_case_sensitive() {
        let registry = chess_only();
        assert!(registry.get_activity("chess club").is_err());
    }

    #[test]
    fn unregister_twice_reports_not_registered() {
        let registry = ActivityRegistry::seeded();
        registry
            .unregister("Soccer Team", "alex@mergington.edu")
            .unwrap();
        assert!(!roster(&registry, "Soccer Team").contains(&"alex@mergington.edu".to_string()));

        let err = registry
            .unregister("Soccer Team", "alex@mergington.edu")
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotRegistered { .. }));
    }

    #[test]
    fn signup_then_unregister_restores_roster() {
        let registry = ActivityRegistry::seeded();
        let before = roster(&registry, "Drama Club");

        registry.signup("Drama Club", "round@mergington.edu").unwrap();
        assert_eq!(roster(&registry, "Drama Club").len(), before.len() + 1);
        registry
            .unregister("Drama Club", "round@mergington.edu")
            .unwrap();

        assert_eq!(roster(&registry, "Drama Club"), before);
    }

    #[test]
    fn unregister_keeps_order_of_the_rest() {
        let registry = chess_only();
        for email in ["a@m.edu", "b@m.edu", "c@m.edu"] {
            registry.signup("Chess Club", email).unwrap();
        }
        registry.unregister("Chess Club", "b@m.edu").unwrap();
        assert_eq!(roster(&registry, "Chess Club"), vec!["a@m.edu", "c@m.edu"]);
    }

    #[test]
    fn one_email_in_several_activities() {
        let registry = ActivityRegistry::seeded();
        registry
            .signup("Soccer Team", "multisport@mergington.edu")
            .unwrap();
        registry
            .signup("Track and Field", "multisport@mergington.edu")
            .unwrap();

        let all = registry.list_activities();
        assert!(all["Soccer Team"].is_registered("multisport@mergington.edu"));
        assert!(all["Track and Field"].is_registered("multisport@mergington.edu"));
    }

    #[test]
    fn list_is_a_snapshot() {
        let registry = chess_only();
        let snapshot = registry.list_activities();
        registry.signup("Chess Club", "late@mergington.edu").unwrap();
        assert!(snapshot["Chess Club"].participants.is_empty());
    }

    #[test]
    fn concurrent_signups_never_overfill() {
        let registry = Arc::new(chess_only());
        let handles: Vec<_> = (0..64)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    registry
                        .signup("Chess Club", &format!("racer{i}@mergington.edu"))
                        .is_ok()
                })
            })
            .collect();

        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        let participants = roster(&registry, "Chess Club");
        assert_eq!(accepted, 12);
        assert_eq!(participants.len(), 12);
        let unique: HashSet<_> = participants.iter().collect();
        assert_eq!(unique.len(), participants.len());
    }

    #[test]
    fn concurrent_unregisters_remove_once() {
        let registry = Arc::new(ActivityRegistry::seeded());
        let before = roster(&registry, "Soccer Team");

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.unregister("Soccer Team", "alex@mergington.edu"))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let removed = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(removed, 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, RegistryError::NotRegistered { .. })));

        let after = roster(&registry, "Soccer Team");
        assert_eq!(after.len(), before.len() - 1);
        assert!(!after.contains(&"alex@mergington.edu".to_string()));
    }
}
