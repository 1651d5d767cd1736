//! Contact search - case-insensitive substring match over a contact snapshot

use crate::entities::Contact;

/// Contacts matching `query` on name, email, company or phone
///
/// A blank query returns every contact. Phone numbers are matched against
/// the lowercased, trimmed term without further normalisation.
pub fn search<'a>(contacts: &'a [Contact], query: &str) -> Vec<&'a Contact> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return contacts.iter().collect();
    }

    let contains = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|value| value.to_lowercase().contains(&term))
    };

    contacts
        .iter()
        .filter(|contact| {
            contains(&contact.name)
                || contains(&contact.email)
                || contains(&contact.company_name)
                || contact
                    .phone
                    .as_deref()
                    .is_some_and(|phone| phone.contains(&term))
        })
        .collect()
}
