use super::*;

// =============================================================
// Tab
// =============================================================

#[test]
fn from_path_matches_each_tab() {
    for tab in Tab::ALL {
        assert_eq!(Tab::from_path(tab.path()), tab);
    }
}

#[test]
fn from_path_tolerates_trailing_slash_and_unknowns() {
    assert_eq!(Tab::from_path("/settings/"), Tab::Settings);
    assert_eq!(Tab::from_path("/nowhere"), Tab::Dashboard);
    assert_eq!(Tab::from_path(""), Tab::Dashboard);
}

// =============================================================
// Theme
// =============================================================

#[test]
fn theme_round_trips_through_storage_value() {
    for theme in [Theme::Light, Theme::Dark] {
        assert_eq!(Theme::parse(theme.as_str()), Some(theme));
    }
    assert_eq!(Theme::parse("sepia"), None);
}

#[test]
fn toggled_flips() {
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
    assert!(Theme::Light.toggled().is_dark());
    assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
}
