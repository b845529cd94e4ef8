//! Plain-text breakdown and printable report.

use chrono::{DateTime, Local};
use netto_core::calculations::IncomeTaxWorksheet;
use netto_core::document::STORAGE_KEY;
use netto_core::{EstimateInput, EstimateResult, EstimatorFeatures, RateTable};
use rust_decimal::Decimal;

use crate::i18n::Language;
use crate::utils::{format_decimal, format_eur, format_percent};

const LABEL_WIDTH: usize = 44;
const VALUE_WIDTH: usize = 16;

/// Line buffer with aligned label/value rows.
#[derive(Default)]
struct Sheet {
    lines: Vec<String>,
}

impl Sheet {
    fn heading(
        &mut self,
        title: &str,
    ) {
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines.push(title.to_string());
        self.lines.push("-".repeat(title.chars().count()));
    }

    fn row(
        &mut self,
        label: &str,
        value: &str,
    ) {
        self.lines
            .push(format!("  {label:<LABEL_WIDTH$}{value:>VALUE_WIDTH$}"));
    }

    fn row_with_hint(
        &mut self,
        label: &str,
        value: &str,
        hint: &str,
    ) {
        self.lines.push(format!(
            "  {label:<LABEL_WIDTH$}{value:>VALUE_WIDTH$}  ({hint})"
        ));
    }

    fn text(
        &mut self,
        line: &str,
    ) {
        self.lines.push(format!("  {line}"));
    }

    fn bullet(
        &mut self,
        line: &str,
    ) {
        self.lines.push(format!("  - {line}"));
    }

    fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

fn monthly(annual: Decimal) -> Decimal {
    annual / Decimal::from(12)
}

/// `de-DE` style local time for German, ISO-like for English.
pub fn format_timestamp(
    at: DateTime<Local>,
    lang: Language,
) -> String {
    match lang {
        Language::De => at.format("%-d.%-m.%Y, %H:%M:%S").to_string(),
        Language::En => at.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

/// Screen summary for `show` and `estimate`.
pub fn render_breakdown(
    result: &EstimateResult,
    lang: Language,
) -> String {
    let l = lang.labels();
    let eur = |v: Decimal| format_eur(v, lang);
    let mut sheet = Sheet::default();

    sheet.heading(l.net_estimate);
    sheet.row(l.per_month, &eur(result.net_monthly));

    sheet.heading(l.taxes_monthly);
    sheet.row(l.taxes_monthly, &eur(result.taxes_monthly()));
    sheet.row(l.income_tax, &eur(monthly(result.taxes.income_tax_annual)));
    sheet.row(l.soli, &eur(monthly(result.taxes.soli_annual)));
    sheet.row(l.church_tax, &eur(monthly(result.taxes.church_annual)));

    sheet.heading(l.social_monthly);
    sheet.row(l.social_monthly, &eur(result.social.total));
    sheet.row(l.pension, &eur(result.social.rv));
    sheet.row(l.unemployment, &eur(result.social.av));
    sheet.row(l.health_kv, &eur(result.social.kv));
    sheet.row(l.care, &eur(result.social.pv));
    sheet.text(lang.social_note(result.social.note));

    if !result.pkv_premium_monthly.is_zero() {
        sheet.lines.push(String::new());
        sheet.row(l.pkv_premium, &eur(result.pkv_premium_monthly));
    }

    sheet.lines.push(String::new());
    sheet.row(l.taxable_income, &eur(result.taxable_income_annual));

    sheet.heading(l.assumptions);
    for line in l.assumption_lines {
        sheet.bullet(line);
    }

    sheet.lines.push(String::new());
    sheet.text(&format!("{}: {STORAGE_KEY}", l.storage_key));
    sheet.finish()
}

/// The printable report sheet.
pub fn render_report(
    input: &EstimateInput,
    result: &EstimateResult,
    rates: &RateTable,
    features: EstimatorFeatures,
    lang: Language,
    generated_at: DateTime<Local>,
) -> String {
    let l = lang.labels();
    let eur = |v: Decimal| format_eur(v, lang);
    let mut sheet = Sheet::default();

    sheet.lines.push("TOOLSTACK".to_string());
    sheet.lines.push(l.report_title.to_string());
    sheet.lines.push(format!(
        "{} {}",
        l.report_generated,
        format_timestamp(generated_at, lang)
    ));
    sheet.lines.push(String::new());
    sheet.row(l.net_monthly, &eur(result.net_monthly));

    sheet.heading(l.inputs);
    sheet.row(l.gross_monthly, &eur(result.gross_monthly));
    sheet.row(l.tax_class, input.tax_class.as_str());
    sheet.row(l.state, input.state.code());
    sheet.row(l.church_tax, lang.yes_no(input.church_tax));
    sheet.row(l.children_allowance, &format_decimal(input.child_allowance, lang));
    sheet.row(l.health, lang.health_type(input.health_type));
    if input.health_type.is_private() && features.private_premium {
        sheet.row(l.pkv_premium, &eur(result.pkv_premium_monthly));
    }

    sheet.heading(l.summary);
    sheet.row(l.gross_annual, &eur(result.gross_annual));
    sheet.row(l.social_annual, &eur(result.social_annual()));
    sheet.row(l.taxes_annual, &eur(result.taxes.total_annual));
    if !result.pkv_premium_monthly.is_zero() {
        sheet.row(
            l.pkv_annual,
            &eur(result.pkv_premium_monthly * Decimal::from(12)),
        );
    }
    sheet.row(l.net_annual, &eur(result.net_annual));

    sheet.heading(l.taxes_breakdown);
    sheet.row(l.income_tax, &eur(result.taxes.income_tax_annual));
    sheet.row(l.soli, &eur(result.taxes.soli_annual));
    if input.church_tax {
        let rate = IncomeTaxWorksheet::new(rates).church_rate(input.state);
        sheet.row_with_hint(
            l.church_tax,
            &eur(result.taxes.church_annual),
            &format!("{}: {}", l.church_rate, format_percent(rate, lang)),
        );
    } else {
        sheet.row(l.church_tax, &eur(result.taxes.church_annual));
    }

    sheet.heading(l.social_breakdown);
    sheet.row(l.pension, &eur(result.social.rv));
    sheet.row(l.unemployment, &eur(result.social.av));
    sheet.row(l.health_kv, &eur(result.social.kv));
    sheet.row(l.care, &eur(result.social.pv));
    sheet.text(lang.social_note(result.social.note));

    sheet.heading(l.disclaimer);
    sheet.bullet(l.disclaimer_estimate);
    sheet.bullet(if features.private_premium {
        l.disclaimer_classes_premium_deducted
    } else {
        l.disclaimer_classes_premium_excluded
    });
    sheet.bullet(l.disclaimer_soli);
    sheet.lines.push(String::new());
    sheet.text(&format!("{}: {STORAGE_KEY}", l.storage_key));
    sheet.finish()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use netto_core::{Estimator, FederalState, HealthType};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn reference_input() -> EstimateInput {
        EstimateInput {
            gross_monthly: dec!(3000),
            ..EstimateInput::default()
        }
    }

    fn generated_at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
    }

    fn report(
        input: &EstimateInput,
        features: EstimatorFeatures,
        lang: Language,
    ) -> String {
        let rates = RateTable::year_2026();
        let result = Estimator::with_features(&rates, features).calculate(input);
        render_report(input, &result, &rates, features, lang, generated_at())
    }

    // =========================================================================
    // render_breakdown
    // =========================================================================

    #[test]
    fn breakdown_shows_headline_figures() {
        let rates = RateTable::year_2026();
        let result = Estimator::new(&rates).calculate(&reference_input());

        let text = render_breakdown(&result, Language::En);

        assert!(text.contains("€2,067.50"), "{text}");
        assert!(text.contains("€280.00"), "{text}");
        assert!(text.contains("€652.50"), "{text}");
        assert!(text.contains("€26,904.00"), "{text}");
        assert!(text.contains(result.social.note.message()));
        assert!(text.contains("Storage key: toolstack.nettoit.v1"));
    }

    #[test]
    fn breakdown_in_german() {
        let rates = RateTable::year_2026();
        let result = Estimator::new(&rates).calculate(&reference_input());

        let text = render_breakdown(&result, Language::De);

        assert!(text.contains("2.067,50 €"), "{text}");
        assert!(text.contains("Lohnsteuer"));
        assert!(text.contains("Speicherschlüssel: toolstack.nettoit.v1"));
    }

    #[test]
    fn breakdown_lists_private_premium_only_when_present() {
        let rates = RateTable::year_2026();
        let public = Estimator::new(&rates).calculate(&reference_input());
        let private = Estimator::new(&rates).calculate(&EstimateInput {
            health_type: HealthType::Private,
            pkv_premium_monthly: dec!(200),
            ..reference_input()
        });

        assert!(!render_breakdown(&public, Language::En).contains("Private premium"));
        assert!(render_breakdown(&private, Language::En).contains("Private premium (monthly)"));
    }

    // =========================================================================
    // render_report
    // =========================================================================

    #[test]
    fn report_has_every_section() {
        let text = report(&reference_input(), EstimatorFeatures::default(), Language::En);

        for section in [
            "Netto-It: German Net Salary (Estimate)",
            "Report generated 2026-03-01 09:30:00",
            "Inputs",
            "Summary",
            "Taxes breakdown (annual)",
            "Social breakdown (monthly)",
            "Disclaimer",
            "Storage key: toolstack.nettoit.v1",
        ] {
            assert!(text.contains(section), "missing {section:?} in\n{text}");
        }
        assert!(text.contains("€36,000.00"));
        assert!(text.contains("€24,810.00"));
        assert!(text.contains("€3,360.00"));
    }

    #[test]
    fn report_church_rate_hint_follows_state() {
        let bavaria = EstimateInput {
            church_tax: true,
            ..reference_input()
        };
        let berlin = EstimateInput {
            state: FederalState::Berlin,
            ..bavaria.clone()
        };

        let by = report(&bavaria, EstimatorFeatures::default(), Language::En);
        let be = report(&berlin, EstimatorFeatures::default(), Language::De);

        assert!(by.contains("(Rate: 8%)"), "{by}");
        assert!(be.contains("(Satz: 9 %)"), "{be}");
    }

    #[test]
    fn report_without_church_tax_has_no_rate_hint() {
        let text = report(&reference_input(), EstimatorFeatures::default(), Language::En);

        assert!(!text.contains("Rate:"));
    }

    #[test]
    fn report_disclaimer_follows_premium_feature() {
        let input = EstimateInput {
            health_type: HealthType::Private,
            pkv_premium_monthly: dec!(200),
            ..reference_input()
        };

        let deducted = report(&input, EstimatorFeatures::default(), Language::En);
        let excluded = report(
            &input,
            EstimatorFeatures {
                private_premium: false,
            },
            Language::En,
        );

        assert!(deducted.contains("deducted as entered"));
        assert!(deducted.contains("Private premium (annual)"));
        assert!(excluded.contains("are not modeled"));
        assert!(!excluded.contains("Private premium (monthly)"));
    }

    #[test]
    fn german_timestamp_format() {
        assert_eq!(format_timestamp(generated_at(), Language::De), "1.3.2026, 09:30:00");
    }
}
