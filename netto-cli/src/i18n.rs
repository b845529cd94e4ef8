//! Output language for breakdowns and reports.

use clap::ValueEnum;
use netto_core::{HealthType, SocialNote};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    De,
}

/// Fixed strings for one language.
#[derive(Debug)]
pub struct Labels {
    pub report_title: &'static str,
    pub report_generated: &'static str,

    pub inputs: &'static str,
    pub gross_monthly: &'static str,
    pub tax_class: &'static str,
    pub state: &'static str,
    pub church_tax: &'static str,
    pub children_allowance: &'static str,
    pub health: &'static str,
    pub pkv_premium: &'static str,
    pub yes: &'static str,
    pub no: &'static str,

    pub net_estimate: &'static str,
    pub per_month: &'static str,
    pub net_monthly: &'static str,
    pub taxes_monthly: &'static str,
    pub social_monthly: &'static str,
    pub taxable_income: &'static str,

    pub summary: &'static str,
    pub gross_annual: &'static str,
    pub social_annual: &'static str,
    pub taxes_annual: &'static str,
    pub pkv_annual: &'static str,
    pub net_annual: &'static str,

    pub taxes_breakdown: &'static str,
    pub income_tax: &'static str,
    pub soli: &'static str,
    pub church_rate: &'static str,

    pub social_breakdown: &'static str,
    pub pension: &'static str,
    pub unemployment: &'static str,
    pub health_kv: &'static str,
    pub care: &'static str,

    pub assumptions: &'static str,
    pub assumption_lines: [&'static str; 4],
    pub disclaimer: &'static str,
    pub disclaimer_estimate: &'static str,
    pub disclaimer_classes_premium_deducted: &'static str,
    pub disclaimer_classes_premium_excluded: &'static str,
    pub disclaimer_soli: &'static str,
    pub storage_key: &'static str,

    pub saved: &'static str,
    pub exported_to: &'static str,
    pub imported_from: &'static str,
    pub reset_done: &'static str,
    pub report_written_to: &'static str,
}

const EN: Labels = Labels {
    report_title: "Netto-It: German Net Salary (Estimate)",
    report_generated: "Report generated",

    inputs: "Inputs",
    gross_monthly: "Gross monthly",
    tax_class: "Tax class",
    state: "State",
    church_tax: "Church tax",
    children_allowance: "Children allowance",
    health: "Health",
    pkv_premium: "Private premium (monthly)",
    yes: "Yes",
    no: "No",

    net_estimate: "NET (EST.)",
    per_month: "per month",
    net_monthly: "Net (monthly est.)",
    taxes_monthly: "Taxes (monthly)",
    social_monthly: "Social (monthly)",
    taxable_income: "Taxable income (annual estimate)",

    summary: "Summary",
    gross_annual: "Gross (annual)",
    social_annual: "Social (annual)",
    taxes_annual: "Taxes (annual)",
    pkv_annual: "Private premium (annual)",
    net_annual: "Net (annual est.)",

    taxes_breakdown: "Taxes breakdown (annual)",
    income_tax: "Income tax",
    soli: "Solidarity surcharge",
    church_rate: "Rate",

    social_breakdown: "Social breakdown (monthly)",
    pension: "Pension (RV)",
    unemployment: "Unemployment (AV)",
    health_kv: "Health (KV)",
    care: "Care (PV)",

    assumptions: "Estimate assumptions",
    assumption_lines: [
        "Social contributions use common 2026 rates + average Zusatzbeitrag.",
        "Private health: statutory KV/PV are 0 here.",
        "Care childless surcharge assumed if children allowance = 0 (and age 23+).",
        "Tax class V/VI use simplified multipliers.",
    ],
    disclaimer: "Disclaimer",
    disclaimer_estimate: "This is a simplified estimate. Your actual payroll net can differ.",
    disclaimer_classes_premium_deducted: "Tax class V/VI are approximations; private health premiums are deducted as entered.",
    disclaimer_classes_premium_excluded: "Tax class V/VI are approximations; private health premiums are not modeled.",
    disclaimer_soli: "Solidarity surcharge uses annual income tax thresholds (2026).",
    storage_key: "Storage key",

    saved: "Saved",
    exported_to: "Exported to",
    imported_from: "Imported from",
    reset_done: "Netto-It data reset to defaults.",
    report_written_to: "Report written to",
};

const DE: Labels = Labels {
    report_title: "Netto-It: Nettogehalt (Schätzung)",
    report_generated: "Bericht erstellt",

    inputs: "Eingaben",
    gross_monthly: "Brutto monatlich",
    tax_class: "Steuerklasse",
    state: "Bundesland",
    church_tax: "Kirchensteuer",
    children_allowance: "Kinderfreibeträge",
    health: "Krankenversicherung",
    pkv_premium: "PKV-Beitrag (monatlich)",
    yes: "Ja",
    no: "Nein",

    net_estimate: "NETTO (GESCH.)",
    per_month: "pro Monat",
    net_monthly: "Netto (monatl. gesch.)",
    taxes_monthly: "Steuern (monatlich)",
    social_monthly: "Sozialabgaben (monatlich)",
    taxable_income: "Zu versteuerndes Einkommen (jährl. Schätzung)",

    summary: "Übersicht",
    gross_annual: "Brutto (jährlich)",
    social_annual: "Sozialabgaben (jährlich)",
    taxes_annual: "Steuern (jährlich)",
    pkv_annual: "PKV-Beitrag (jährlich)",
    net_annual: "Netto (jährl. gesch.)",

    taxes_breakdown: "Steuern im Detail (jährlich)",
    income_tax: "Lohnsteuer",
    soli: "Solidaritätszuschlag",
    church_rate: "Satz",

    social_breakdown: "Sozialabgaben im Detail (monatlich)",
    pension: "Rente (RV)",
    unemployment: "Arbeitslosigkeit (AV)",
    health_kv: "Kranken (KV)",
    care: "Pflege (PV)",

    assumptions: "Annahmen der Schätzung",
    assumption_lines: [
        "Sozialabgaben mit üblichen Sätzen 2026 und durchschnittlichem Zusatzbeitrag.",
        "Private Krankenversicherung: gesetzliche KV/PV sind hier 0.",
        "Kinderlosenzuschlag in der PV bei 0 Kinderfreibeträgen (ab 23 Jahren).",
        "Steuerklassen V/VI mit vereinfachten Faktoren.",
    ],
    disclaimer: "Hinweis",
    disclaimer_estimate: "Dies ist eine vereinfachte Schätzung. Ihr tatsächliches Netto kann abweichen.",
    disclaimer_classes_premium_deducted: "Steuerklassen V/VI sind Näherungen; PKV-Beiträge werden wie eingegeben abgezogen.",
    disclaimer_classes_premium_excluded: "Steuerklassen V/VI sind Näherungen; PKV-Beiträge werden nicht berücksichtigt.",
    disclaimer_soli: "Der Solidaritätszuschlag nutzt die jährlichen Freigrenzen (2026).",
    storage_key: "Speicherschlüssel",

    saved: "Gespeichert",
    exported_to: "Exportiert nach",
    imported_from: "Importiert aus",
    reset_done: "Netto-It-Daten auf Standardwerte zurückgesetzt.",
    report_written_to: "Bericht geschrieben nach",
};

impl Language {
    pub fn labels(&self) -> &'static Labels {
        match self {
            Language::En => &EN,
            Language::De => &DE,
        }
    }

    pub fn health_type(
        &self,
        health_type: HealthType,
    ) -> &'static str {
        match (self, health_type) {
            (Language::En, HealthType::Public) => "Public (GKV)",
            (Language::En, HealthType::Private) => "Private (PKV)",
            (Language::De, HealthType::Public) => "Gesetzlich (GKV)",
            (Language::De, HealthType::Private) => "Privat (PKV)",
        }
    }

    pub fn social_note(
        &self,
        note: SocialNote,
    ) -> &'static str {
        match self {
            Language::En => note.message(),
            Language::De => match note {
                SocialNote::PrivatePremiumDeducted => {
                    "Privat versichert: gesetzliche KV/PV-Beiträge sind 0. Der PKV-Beitrag wird vom Netto abgezogen."
                }
                SocialNote::PrivatePremiumExcluded => {
                    "Privat versichert: gesetzliche KV/PV-Beiträge sind 0. PKV-Beiträge sind NICHT enthalten."
                }
                SocialNote::ChildlessSurchargeApplied => {
                    "Enthält Kinderlosenzuschlag in der Pflege (0,6 %) ab 23 Jahren."
                }
                SocialNote::ChildlessSurchargeWaived => {
                    "Kein Kinderlosenzuschlag (Kinderfreibeträge > 0)."
                }
            },
        }
    }

    pub fn yes_no(
        &self,
        value: bool,
    ) -> &'static str {
        let labels = self.labels();
        if value { labels.yes } else { labels.no }
    }
}
