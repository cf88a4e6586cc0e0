use std::collections::HashSet;

use domain::value_objects::saved_addresses::{
    AddressOrigin, PastDelivery, ProfileAddress, SavedAddress,
};

/// Merges the profile address with order history into a deduplicated,
/// selectable list. The literal address string identifies a delivery point;
/// first seen wins, so the profile entry shadows history and newer orders
/// shadow older ones.
pub fn resolve_addresses(
    profile: Option<&ProfileAddress>,
    past_orders: &[PastDelivery],
) -> Vec<SavedAddress> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    if let Some(profile) = profile {
        seen.insert(profile.address.clone());
        resolved.push(SavedAddress {
            id: 0,
            name: profile.name.clone(),
            phone: profile.phone.clone(),
            address: profile.address.clone(),
            origin: AddressOrigin::Profile,
        });
    }

    for order in past_orders {
        if seen.insert(order.address.clone()) {
            resolved.push(SavedAddress {
                id: resolved.len(),
                name: order.name.clone(),
                phone: order.phone.clone(),
                address: order.address.clone(),
                origin: AddressOrigin::History,
            });
        }
    }

    resolved
}

/// Guest sessions resolve against the device-local cache; the dedup rule is
/// the same address-string rule as the signed-in path.
pub fn resolve_guest_addresses(entries: &[PastDelivery]) -> Vec<SavedAddress> {
    resolve_addresses(None, entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn profile() -> ProfileAddress {
        ProfileAddress {
            name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
            address: "12 MG Road, Bengaluru".to_string(),
        }
    }

    fn order(name: &str, address: &str, days_ago: i64) -> PastDelivery {
        PastDelivery {
            name: name.to_string(),
            phone: "9123456780".to_string(),
            address: address.to_string(),
            created_at: Utc::now() - Duration::days(days_ago),
        }
    }

    #[test]
    fn profile_comes_first_then_distinct_history() {
        let orders = vec![order("Asha Rao", "44 Park Street, Kolkata", 1)];

        let resolved = resolve_addresses(Some(&profile()), &orders);

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].origin, AddressOrigin::Profile);
        assert_eq!(resolved[0].address, "12 MG Road, Bengaluru");
        assert_eq!(resolved[1].origin, AddressOrigin::History);
        assert_eq!(resolved[1].address, "44 Park Street, Kolkata");
    }

    #[test]
    fn identical_address_text_collapses_even_when_names_differ() {
        let orders = vec![
            order("Asha Rao", "44 Park Street, Kolkata", 1),
            order("Ravi Kumar", "44 Park Street, Kolkata", 5),
        ];

        let resolved = resolve_addresses(None, &orders);

        assert_eq!(resolved.len(), 1);
        // First seen wins: the most recent order supplies the name.
        assert_eq!(resolved[0].name, "Asha Rao");
    }

    #[test]
    fn history_matching_the_profile_address_is_swallowed() {
        let orders = vec![
            order("Asha Rao", "12 MG Road, Bengaluru", 1),
            order("Asha Rao", "44 Park Street, Kolkata", 2),
        ];

        let resolved = resolve_addresses(Some(&profile()), &orders);

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].origin, AddressOrigin::Profile);
        assert_eq!(resolved[1].address, "44 Park Street, Kolkata");
    }

    #[test]
    fn resolution_is_idempotent() {
        let orders = vec![
            order("Asha Rao", "44 Park Street, Kolkata", 1),
            order("Ravi Kumar", "7 Lake View, Mumbai", 2),
        ];

        let first = resolve_addresses(Some(&profile()), &orders);
        let second = resolve_addresses(Some(&profile()), &orders);
        assert_eq!(first, second);
    }

    #[test]
    fn ids_are_positional() {
        let orders = vec![
            order("Asha Rao", "44 Park Street, Kolkata", 1),
            order("Ravi Kumar", "7 Lake View, Mumbai", 2),
        ];

        let resolved = resolve_addresses(Some(&profile()), &orders);
        let ids: Vec<usize> = resolved.iter().map(|address| address.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn guest_resolution_uses_the_same_rule() {
        let entries = vec![
            order("Guest", "44 Park Street, Kolkata", 1),
            order("Guest", "44 Park Street, Kolkata", 3),
        ];

        let resolved = resolve_guest_addresses(&entries);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].origin, AddressOrigin::History);
    }
}
