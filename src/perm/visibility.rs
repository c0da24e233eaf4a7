//! Board visibility for WLD.

use std::collections::HashSet;

/// Check whether a user holding `granted` tags may view a board requiring `required`.
///
/// Every required tag must be granted; a board with no required tags is
/// public.
///
/// # Examples
///
/// ```
/// use wld::perm::can_view;
///
/// let none: [&str; 0] = [];
/// assert!(can_view(&none, &none));
/// assert!(can_view(&["officers", "raiders"], &["raiders"]));
/// assert!(!can_view(&["raiders"], &["officers", "raiders"]));
/// ```
pub fn can_view<G, R>(granted: &[G], required: &[R]) -> bool
where
    G: AsRef<str>,
    R: AsRef<str>,
{
    missing_perms(granted, required).is_empty()
}

/// Required tags the user does not hold, in the order they were required.
pub fn missing_perms<G, R>(granted: &[G], required: &[R]) -> Vec<String>
where
    G: AsRef<str>,
    R: AsRef<str>,
{
    let granted: HashSet<&str> = granted.iter().map(AsRef::as_ref).collect();
    required
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !granted.contains(name))
        .map(str::to_string)
        .collect()
}
