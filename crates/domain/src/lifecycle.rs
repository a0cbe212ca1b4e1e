use chrono::{DateTime, Utc};
use keyward_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Records that move between the active and inactive states through soft delete.
pub trait Lifecycle {
    /// Human readable record kind used in error messages.
    const LABEL: &'static str;

    /// Returns the record identifier.
    fn record_id(&self) -> Uuid;

    /// Returns whether the record is currently active.
    fn is_active(&self) -> bool;

    /// Sets the active flag and bumps the modification timestamp.
    fn set_active(&mut self, is_active: bool, at: DateTime<Utc>);

    /// Protected records can never leave the active state.
    fn is_protected(&self) -> bool {
        false
    }

    /// Returns the current lifecycle state.
    fn state(&self) -> LifecycleState {
        LifecycleState::from_flag(self.is_active())
    }
}

/// Two-state lifecycle shared by tenants, users, roles, groups and permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Visible to listings, assignment and resolution.
    Active,
    /// Soft deleted; still retrievable by identifier.
    Inactive,
}

impl LifecycleState {
    /// Maps a stored active flag to a state.
    #[must_use]
    pub fn from_flag(is_active: bool) -> Self {
        if is_active {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    /// Returns the stored active flag for this state.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Outcome of a requested change to the active flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleTransition {
    /// The flag is absent or already matches the current state.
    Unchanged,
    /// `Active -> Inactive`.
    Deactivate,
    /// `Inactive -> Active`.
    Reactivate,
}

impl LifecycleTransition {
    /// Applies the transition to a record.
    pub fn apply<E: Lifecycle>(self, entity: &mut E, at: DateTime<Utc>) {
        match self {
            Self::Unchanged => {}
            Self::Deactivate => entity.set_active(false, at),
            Self::Reactivate => entity.set_active(true, at),
        }
    }
}

/// Plans the transition for an update that may carry a new active flag.
///
/// Protected records reject any request that sets the flag to `false`, even when
/// it would not change the stored state.
pub fn plan_transition<E: Lifecycle>(
    entity: &E,
    requested: Option<bool>,
) -> AppResult<LifecycleTransition> {
    let Some(requested) = requested else {
        return Ok(LifecycleTransition::Unchanged);
    };

    if !requested && entity.is_protected() {
        return Err(AppError::Forbidden(format!(
            "system {} '{}' cannot be deactivated",
            E::LABEL,
            entity.record_id()
        )));
    }

    Ok(match (entity.state(), requested) {
        (LifecycleState::Active, false) => LifecycleTransition::Deactivate,
        (LifecycleState::Inactive, true) => LifecycleTransition::Reactivate,
        _ => LifecycleTransition::Unchanged,
    })
}

/// Fails with `NotFound` when the record is inactive.
pub fn ensure_active<E: Lifecycle>(entity: &E) -> AppResult<()> {
    if entity.is_active() {
        return Ok(());
    }

    Err(AppError::NotFound(format!(
        "{} '{}' is inactive",
        E::LABEL,
        entity.record_id()
    )))
}

/// Checks that a soft delete may proceed.
///
/// Protection is checked before state so a system role always reports `Forbidden`.
pub fn ensure_deletable<E: Lifecycle>(entity: &E) -> AppResult<()> {
    if entity.is_protected() {
        return Err(AppError::Forbidden(format!(
            "system {} '{}' cannot be deleted",
            E::LABEL,
            entity.record_id()
        )));
    }

    ensure_active(entity)
}

#[cfg(test)]
mod tests {
    use keyward_core::{AppError, TenantId};
    use proptest::prelude::*;

    use super::{
        Lifecycle, LifecycleState, LifecycleTransition, ensure_active, ensure_deletable,
        plan_transition,
    };
    use crate::{Group, Role};

    fn role(is_system_role: bool) -> Role {
        Role::new(TenantId::new(), "admin", None, is_system_role)
            .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn system_role_cannot_be_deleted() {
        let role = role(true);
        assert!(matches!(
            ensure_deletable(&role),
            Err(AppError::Forbidden(message)) if message.contains("cannot be deleted")
        ));
    }

    #[test]
    fn deleting_an_inactive_record_is_not_found() {
        let mut group = Group::new(TenantId::new(), "ops", None).unwrap_or_else(|_| unreachable!());
        group.set_active(false, chrono::Utc::now());

        assert!(matches!(ensure_deletable(&group), Err(AppError::NotFound(_))));
        assert!(matches!(ensure_active(&group), Err(AppError::NotFound(_))));
    }

    #[test]
    fn reactivation_is_planned_for_inactive_records() {
        let mut role = role(false);
        role.set_active(false, chrono::Utc::now());

        let transition = plan_transition(&role, Some(true));
        assert!(matches!(transition, Ok(LifecycleTransition::Reactivate)));

        if let Ok(transition) = transition {
            transition.apply(&mut role, chrono::Utc::now());
        }
        assert_eq!(role.state(), LifecycleState::Active);
    }

    proptest! {
        #[test]
        fn system_roles_never_accept_deactivation(requested in proptest::option::of(any::<bool>())) {
            let role = role(true);
            let result = plan_transition(&role, requested);

            if requested == Some(false) {
                prop_assert!(matches!(result, Err(AppError::Forbidden(_))));
            } else {
                prop_assert!(matches!(result, Ok(LifecycleTransition::Unchanged)));
            }
        }

        #[test]
        fn planned_transition_lands_on_requested_state(
            start_active in any::<bool>(),
            requested in any::<bool>(),
        ) {
            let mut group = Group::new(TenantId::new(), "ops", None).unwrap_or_else(|_| unreachable!());
            group.set_active(start_active, chrono::Utc::now());

            let transition = plan_transition(&group, Some(requested));
            prop_assert!(transition.is_ok());
            if let Ok(transition) = transition {
                prop_assert_eq!(
                    transition == LifecycleTransition::Unchanged,
                    start_active == requested
                );
                transition.apply(&mut group, chrono::Utc::now());
            }
            prop_assert_eq!(group.is_active(), requested);
        }
    }
}
