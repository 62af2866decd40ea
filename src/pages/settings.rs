//! Settings page: store profile with per-field validation, and appearance.

use crate::{
    core::settings::StoreProfile,
    errors::Result,
    notify::{Notification, Notifier},
    pages::PageKind,
    theme::Theme,
    ui::{
        ListItem, Page, Section, Shell, StatsCard,
        format::{mask_phone, mask_postal_code},
    },
};
use tracing::info;

#[must_use]
pub fn build(profile: &StoreProfile, theme: Theme) -> Page {
    let card = ListItem {
        title: profile.name.clone(),
        subtitle: Some(profile.address.clone()),
        meta: vec![
            format!("Phone: {}", mask_phone(&profile.phone)),
            format!("E-mail: {}", profile.email),
            format!("Postal code: {}", mask_postal_code(&profile.postal_code)),
        ],
        badge: None,
    };

    let errors = profile.field_errors();
    let mut shells = vec![Shell::ListItem(card)];
    for (field, message) in errors.iter() {
        shells.push(Shell::error(
            format!("{}: {message}", field.label()),
            "edit the field and save again",
        ));
    }

    Page::new(PageKind::Settings.title())
        .with_section(Section::new("Store profile", shells))
        .with_section(Section::new(
            "Appearance",
            vec![Shell::Stats(StatsCard::new("Theme", theme.as_str()))],
        ))
}

/// Saves the profile once every field is valid.
///
/// # Errors
/// Returns `Error::Validation` with every failing field; nothing is saved
/// and no notification is raised.
pub fn save(profile: &StoreProfile, notifier: &dyn Notifier) -> Result<()> {
    profile.validate()?;
    info!("Store profile '{}' saved", profile.name);
    notifier.notify(Notification::success("Settings saved"));
    Ok(())
}
