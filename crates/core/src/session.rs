//! Signed-in user state and route guarding
//!
//! The viewer route is restricted to administrators: no signed-in user
//! redirects to the sign-in screen, a signed-in non-admin redirects home.
//! [`AuthStore`] keeps the in-memory user and persists it through an
//! explicitly provided [`Store`], so tests can point it at a scratch
//! directory.

use pagemark_store::{Store, USER_INFO_KEY};
use serde::{Deserialize, Serialize};

/// Role string granting access to the viewer.
pub const ADMIN_ROLE: &str = "admin";

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub role: String,
}

impl UserInfo {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Outcome of the admin-only route guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// User is a signed-in admin.
    Allow,
    /// Nobody is signed in.
    RedirectToAuth,
    /// Signed in, but not an admin.
    RedirectToHome,
}

/// Gate access to the viewer: only signed-in admins pass.
pub fn admin_only(user: Option<&UserInfo>) -> RouteDecision {
    match user {
        None => RouteDecision::RedirectToAuth,
        Some(user) if user.is_admin() => RouteDecision::Allow,
        Some(_) => RouteDecision::RedirectToHome,
    }
}

/// In-memory auth state backed by persistent storage.
#[derive(Debug, Clone, Default)]
pub struct AuthStore {
    user: Option<UserInfo>,
}

impl AuthStore {
    /// Restore the persisted user, if any. A missing or unreadable entry
    /// yields the signed-out state.
    pub fn load(store: &Store) -> Self {
        let user = match store.load_json::<UserInfo>(USER_INFO_KEY) {
            Ok(user) => user,
            Err(err) => {
                log::warn!("failed to restore user info: {err}");
                None
            }
        };
        Self { user }
    }

    /// Fresh signed-out state.
    pub fn signed_out() -> Self {
        Self { user: None }
    }

    pub fn current(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    /// Sign in and persist the user. Persistence failures are logged; the
    /// in-memory state changes regardless.
    pub fn login(&mut self, store: &Store, user: UserInfo) {
        if let Err(err) = store.save_json(USER_INFO_KEY, &user) {
            log::warn!("failed to persist user info: {err}");
        }
        self.user = Some(user);
    }

    /// Sign in without persistence, for when storage is unavailable.
    pub fn login_in_memory(&mut self, user: UserInfo) {
        self.user = Some(user);
    }

    /// Sign out and remove the persisted user.
    pub fn logout(&mut self, store: &Store) {
        if let Err(err) = store.remove(USER_INFO_KEY) {
            log::warn!("failed to remove user info: {err}");
        }
        self.user = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scratch_store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::at(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn guard_redirects_signed_out_users_to_auth() {
        assert_eq!(admin_only(None), RouteDecision::RedirectToAuth);
    }

    #[test]
    fn guard_redirects_non_admins_home() {
        let user = UserInfo::new("pat", "reader");
        assert_eq!(admin_only(Some(&user)), RouteDecision::RedirectToHome);
    }

    #[test]
    fn guard_allows_admins() {
        let user = UserInfo::new("sam", ADMIN_ROLE);
        assert_eq!(admin_only(Some(&user)), RouteDecision::Allow);
    }

    #[test]
    fn login_persists_across_loads() {
        let (_dir, store) = scratch_store();
        let mut auth = AuthStore::signed_out();
        auth.login(&store, UserInfo::new("sam", ADMIN_ROLE));

        let restored = AuthStore::load(&store);
        assert_eq!(restored.current(), Some(&UserInfo::new("sam", ADMIN_ROLE)));
    }

    #[test]
    fn logout_clears_memory_and_disk() {
        let (_dir, store) = scratch_store();
        let mut auth = AuthStore::signed_out();
        auth.login(&store, UserInfo::new("sam", ADMIN_ROLE));
        auth.logout(&store);

        assert!(auth.current().is_none());
        assert!(AuthStore::load(&store).current().is_none());
    }

    #[test]
    fn load_from_empty_store_is_signed_out() {
        let (_dir, store) = scratch_store();
        assert!(AuthStore::load(&store).current().is_none());
    }

    #[test]
    fn corrupt_user_info_falls_back_to_signed_out() {
        let (_dir, store) = scratch_store();
        store.save_bytes(USER_INFO_KEY, b"not json").unwrap();
        assert!(AuthStore::load(&store).current().is_none());
    }
}
