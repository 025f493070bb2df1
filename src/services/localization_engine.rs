use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde_json::Value;

use crate::types::errors::LocaleError;
use crate::types::settings::Locale;

const KO_TABLE: &str = include_str!("../../locales/ko.json");
const EN_TABLE: &str = include_str!("../../locales/en.json");

/// Supported locales, in detection preference order.
const SUPPORTED_LOCALES: &[Locale] = &[Locale::Ko, Locale::En];

/// Trait defining the localization engine interface.
pub trait LocalizationEngineTrait {
    fn set_locale(&mut self, locale: Locale) -> Result<(), LocaleError>;
    fn get_locale(&self) -> Locale;
    fn t(&self, key: &str, params: Option<&HashMap<String, String>>) -> String;
    fn plural(&self, key: &str, count: u64, params: Option<&HashMap<String, String>>) -> String;
    fn format_date(&self, date: NaiveDate) -> String;
    fn detect_system_locale(&self) -> Locale;
    fn get_available_locales(&self) -> Vec<Locale>;
}

/// Message tables for Korean and English.
pub struct LocalizationEngine {
    current_locale: Locale,
    /// Parsed message table per locale.
    locales: HashMap<Locale, Value>,
}

impl LocalizationEngine {
    /// Creates an engine from the message tables compiled into the crate.
    pub fn bundled(locale: Locale) -> Result<Self, LocaleError> {
        let mut locales = HashMap::new();
        locales.insert(Locale::Ko, Self::parse_table("ko", KO_TABLE)?);
        locales.insert(Locale::En, Self::parse_table("en", EN_TABLE)?);
        Ok(Self {
            current_locale: locale,
            locales,
        })
    }

    /// Replaces bundled tables with `<code>.json` files found in `dir`.
    ///
    /// Missing files keep the bundled table. Returns how many tables were replaced.
    pub fn load_overrides(&mut self, dir: &Path) -> Result<usize, LocaleError> {
        let mut replaced = 0;
        for locale in SUPPORTED_LOCALES {
            let file_path = dir.join(format!("{}.json", locale.code()));
            if !file_path.exists() {
                continue;
            }
            let content = fs::read_to_string(&file_path).map_err(|e| {
                LocaleError::InvalidTable(format!("{}: {}", file_path.to_string_lossy(), e))
            })?;
            let table = Self::parse_table(locale.code(), &content)?;
            self.locales.insert(*locale, table);
            replaced += 1;
        }
        Ok(replaced)
    }

    fn parse_table(code: &str, content: &str) -> Result<Value, LocaleError> {
        serde_json::from_str(content)
            .map_err(|e| LocaleError::InvalidTable(format!("{}: {}", code, e)))
    }

    /// Looks up a nested key in a JSON value using dot notation.
    /// For example, "time.just_now" looks up `value["time"]["just_now"]`.
    fn lookup_key<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
        let mut current = data;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Replaces `{param_name}` placeholders in a string with values from the params map.
    fn interpolate(template: &str, params: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in params {
            let placeholder = format!("{{{}}}", key);
            result = result.replace(&placeholder, value);
        }
        result
    }

    /// Returns the plural form suffix for the current locale.
    /// Korean has no grammatical plural; English distinguishes "one".
    fn get_plural_form(&self, count: u64) -> &'static str {
        match self.current_locale {
            Locale::Ko => "other",
            Locale::En if count == 1 => "one",
            Locale::En => "other",
        }
    }

    /// Shorthand for a message with a single `{count}` parameter.
    pub fn t_count(&self, key: &str, count: i64) -> String {
        let params = HashMap::from([("count".to_string(), count.to_string())]);
        self.t(key, Some(&params))
    }
}

impl LocalizationEngineTrait for LocalizationEngine {
    fn set_locale(&mut self, locale: Locale) -> Result<(), LocaleError> {
        if !self.locales.contains_key(&locale) {
            return Err(LocaleError::UnsupportedLocale(locale.code().to_string()));
        }
        self.current_locale = locale;
        Ok(())
    }

    fn get_locale(&self) -> Locale {
        self.current_locale
    }

    /// Looks up a translation key using dot notation and optionally interpolates parameters.
    /// Returns the key itself if the translation is not found.
    fn t(&self, key: &str, params: Option<&HashMap<String, String>>) -> String {
        let text = match self
            .locales
            .get(&self.current_locale)
            .and_then(|data| Self::lookup_key(data, key))
            .and_then(Value::as_str)
        {
            Some(s) => s.to_string(),
            None => return key.to_string(),
        };

        match params {
            Some(p) => Self::interpolate(&text, p),
            None => text,
        }
    }

    /// Looks up `<key>_<form>` for the current plural rules, falling back to
    /// `<key>_other`. A `{count}` parameter is added automatically.
    fn plural(&self, key: &str, count: u64, params: Option<&HashMap<String, String>>) -> String {
        let form = self.get_plural_form(count);
        let plural_key = format!("{}_{}", key, form);

        let mut merged_params = params.cloned().unwrap_or_default();
        merged_params
            .entry("count".to_string())
            .or_insert_with(|| count.to_string());

        let result = self.t(&plural_key, Some(&merged_params));
        if result != plural_key {
            return result;
        }

        let other_key = format!("{}_other", key);
        let other_result = self.t(&other_key, Some(&merged_params));
        if other_result == other_key {
            return key.to_string();
        }
        other_result
    }

    /// Calendar date in the locale's short numeric style
    /// (`2024. 1. 5.` for Korean, `1/5/2024` for English).
    fn format_date(&self, date: NaiveDate) -> String {
        let params = HashMap::from([
            ("year".to_string(), date.year().to_string()),
            ("month".to_string(), date.month().to_string()),
            ("day".to_string(), date.day().to_string()),
        ]);
        self.t("time.date", Some(&params))
    }

    /// Detects the system locale from `LANG`, falling back to Korean.
    fn detect_system_locale(&self) -> Locale {
        let lang = std::env::var("LANG").unwrap_or_default();
        Locale::from_code(&lang)
            .filter(|locale| self.locales.contains_key(locale))
            .unwrap_or(Locale::Ko)
    }

    fn get_available_locales(&self) -> Vec<Locale> {
        SUPPORTED_LOCALES
            .iter()
            .filter(|locale| self.locales.contains_key(*locale))
            .copied()
            .collect()
    }
}
