//! Fixed messages written into generated bots.

use crate::config::Locale;

/// Runtime texts a generated bot sends to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    /// Reply of a handler whose API profile is missing.
    pub not_configured: &'static str,
    /// Reply when the API call or response processing throws.
    pub request_failed: &'static str,
    /// Reply when none of the mapped fields had a value.
    pub no_data: &'static str,
    pub unknown_command: &'static str,
}

const JA: Messages = Messages {
    not_configured: "APIプロファイルが設定されていません。",
    request_failed: "エラーが発生しました。もう一度お試しください。",
    no_data: "表示できるデータがありません。",
    unknown_command: "不明なコマンドです。",
};

const EN: Messages = Messages {
    not_configured: "API profile not configured.",
    request_failed: "Something went wrong. Please try again.",
    no_data: "No data to display.",
    unknown_command: "Unknown command.",
};

impl Messages {
    pub fn for_locale(locale: Locale) -> &'static Messages {
        match locale {
            Locale::Ja => &JA,
            Locale::En => &EN,
        }
    }
}
