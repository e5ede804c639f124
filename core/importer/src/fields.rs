//! FILENAME: core/importer/src/fields.rs
//! PURPOSE: Resolves the named supplier fields from the free-form
//! questionnaire sheet.
//! CONTEXT: Questionnaires are human-authored and drift between revisions,
//! so fields are located by case-insensitive substring fragments rather
//! than fixed cell addresses. The label usually sits in column B with the
//! value in column C; some revisions put the label in column A.

use engine::Grid;
use log::debug;

// Candidate label fragments per field, evaluated in this order.
// All fragments are lowercase; labels are lowercased before matching.
const FULL_NAME_KEYS: &[&str] = &["полное наименование", "наименование организации"];
const SHORT_NAME_KEYS: &[&str] = &["сокращенное наименование", "торговая марка"];
const INN_KEYS: &[&str] = &["инн"];
const CONTACT_KEYS: &[&str] = &["контактное лицо"];
const POSITION_KEYS: &[&str] = &["должност", "должность"];
const PHONE_KEYS: &[&str] = &["телефон"];
const EMAIL_KEYS: &[&str] = &["e-mail", "email", "электронной"];
const REGION_FIELD_KEYS: &[&str] = &["регион (астрахань/екатеринбург)"];
const CITY_KEYS: &[&str] = &["город"];
const TAX_KEYS: &[&str] = &["система налогооблож", "с ндс", "без ндс"];
const PERSON_NAME_KEYS: &[&str] = &["ф.и.о"];

/// City substring -> region label, applied when the region field is blank.
const REGION_BY_CITY: &[(&str, &str)] = &[
    ("астрахан", "Астрахань"),
    ("екатерин", "Екатеринбург"),
];

/// Fields of one supplier questionnaire after extraction and derivation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    pub full_name: String,
    pub short_name: String,
    pub inn: String,
    pub contact: String,
    pub position: String,
    pub phone: String,
    pub email: String,
    pub region: String,
    pub city: String,
    pub tax_regime: String,
    /// Name written into the registry: the short name when present, else
    /// the full name.
    pub registry_name: String,
}

/// Extracts the supplier fields from the questionnaire form sheet.
/// Deterministic: the same grid always yields the same fields.
pub fn extract_form_fields(grid: &Grid) -> FormFields {
    let pairs = label_value_pairs(grid);

    let full_name = find_value(&pairs, FULL_NAME_KEYS);
    let short_name = find_value(&pairs, SHORT_NAME_KEYS);
    let inn = find_value(&pairs, INN_KEYS);
    let position = find_value(&pairs, POSITION_KEYS);
    let email = find_value(&pairs, EMAIL_KEYS);
    let city = find_value(&pairs, CITY_KEYS);

    // The signature block ("Ф.И.О.") is the better contact source; the
    // dedicated contact row is often left blank.
    let person_name = find_value(&pairs, PERSON_NAME_KEYS);
    let contact = if person_name.is_empty() {
        find_value(&pairs, CONTACT_KEYS)
    } else {
        person_name
    };

    let mut phone = find_value(&pairs, PHONE_KEYS);
    if phone.is_empty() {
        // Recovery pass: take the first row mentioning a phone at all,
        // whatever its value.
        if let Some((_, value)) = pairs.iter().find(|(label, _)| label.contains("телефон")) {
            phone = value.clone();
        }
    }

    let tax_regime = normalize_tax_regime(&find_value(&pairs, TAX_KEYS));

    let region_field = find_value(&pairs, REGION_FIELD_KEYS);
    let region = if region_field.is_empty() {
        infer_region(&city)
    } else {
        region_field
    };

    let registry_name = if short_name.is_empty() {
        full_name.clone()
    } else {
        short_name.clone()
    };
    if registry_name.is_empty() {
        debug!("questionnaire sheet yielded no organization name");
    }

    FormFields {
        full_name,
        short_name,
        inn,
        contact,
        position,
        phone,
        email,
        region,
        city,
        tax_regime,
        registry_name,
    }
}

/// Collects (lowercased label, trimmed value) pairs row by row. The label
/// is column 1 when non-blank, else column 0; the value is column 2. Rows
/// with neither are skipped.
fn label_value_pairs(grid: &Grid) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for row in 0..grid.row_count() {
        let mut label = grid.text_at(row, 1);
        if label.is_empty() {
            label = grid.text_at(row, 0);
        }
        let value = grid.text_at(row, 2);
        if label.is_empty() && value.is_empty() {
            continue;
        }
        pairs.push((label.to_lowercase(), value));
    }
    pairs
}

/// Value of the first pair whose label contains any fragment. Pairs whose
/// value is empty or a stray "nan" artifact are passed over so a later
/// matching row can still supply the field.
fn find_value(pairs: &[(String, String)], keys: &[&str]) -> String {
    for (label, value) in pairs {
        if keys.iter().any(|key| label.contains(key))
            && !value.is_empty()
            && !value.eq_ignore_ascii_case("nan")
        {
            return value.clone();
        }
    }
    String::new()
}

/// Canonicalizes the tax regime answer. Free-text mentions of VAT are
/// reduced to the two labels the registry uses; anything unrecognized is
/// kept verbatim.
fn normalize_tax_regime(value: &str) -> String {
    let s = value.trim().to_lowercase();
    if s.is_empty() {
        return String::new();
    }
    if s.contains("без") && s.contains("ндс") {
        return "Без НДС".to_string();
    }
    if s.contains("с ндс")
        || (s.contains("ндс") && (s.contains("с ") || s.contains("включ") || s.contains("вкл")))
    {
        return "С НДС".to_string();
    }
    value.trim().to_string()
}

fn infer_region(city: &str) -> String {
    let city = city.to_lowercase();
    for (fragment, region) in REGION_BY_CITY {
        if city.contains(fragment) {
            return (*region).to_string();
        }
    }
    String::new()
}
