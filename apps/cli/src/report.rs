//! # Reports
//!
//! Renders calculation results, rate tables and the program calendar for
//! people (text) and for other tools (JSON, CSV).
//!
//! Every amount shown here is converted from the base currency with
//! [`convert`] and only then rounded by [`format_amount`] or
//! [`format_plain`]. Nothing in this module feeds back into a calculation.

use std::fmt;

use chrono::NaiveDate;

use agri_core::{
    convert, format_amount, AnimalType, CalculationResult, Crop, Currency, Ecoscheme, FarmInput,
    ProgramCalendar, RateSchedule, RATES_SOURCE,
};

use crate::error::AppResult;

const LABEL_WIDTH: usize = 44;
const AMOUNT_WIDTH: usize = 20;

// =============================================================================
// Text Summary
// =============================================================================

/// Itemized, human-readable breakdown of one calculation.
///
/// Lists farm basics, then each category with its non-zero line items and
/// the declared area or head count, then the grand total and any warnings.
pub struct Summary<'a> {
    pub farm: &'a FarmInput,
    pub result: &'a CalculationResult,
    pub schedule: &'a RateSchedule,
    pub warnings: &'a [String],
}

impl Summary<'_> {
    fn money(&self, base_amount: f64) -> String {
        format_amount(
            convert(base_amount, self.result.currency, self.schedule),
            self.result.currency,
        )
    }

    fn line(&self, f: &mut fmt::Formatter<'_>, label: &str, base_amount: f64) -> fmt::Result {
        writeln!(
            f,
            "  {:<lw$}{:>aw$}",
            label,
            self.money(base_amount),
            lw = LABEL_WIDTH,
            aw = AMOUNT_WIDTH
        )
    }

    fn section_total(&self, f: &mut fmt::Formatter<'_>, total: f64) -> fmt::Result {
        writeln!(f, "  {}", "-".repeat(LABEL_WIDTH + AMOUNT_WIDTH))?;
        self.line(f, "Total", total)?;
        writeln!(f)
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let farm = self.farm;
        let result = self.result;

        let title = format!("Agricultural Subsidies {}", self.schedule.program_year);
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "=".repeat(title.chars().count()))?;
        writeln!(f, "Total area:        {:.2} ha", farm.total_area)?;
        writeln!(f, "Young farmer:      {}", yes_no(farm.is_young_farmer))?;
        writeln!(f, "Small farm:        {}", yes_no(farm.is_small_farm))?;
        writeln!(f, "Display currency:  {}", result.currency)?;
        writeln!(f)?;

        writeln!(f, "Direct payments")?;
        let mut any = false;
        for (label, amount) in result.direct_payments.line_items() {
            if amount != 0.0 {
                self.line(f, label, amount)?;
                any = true;
            }
        }
        if !any {
            writeln!(f, "  (none)")?;
        }
        self.section_total(f, result.direct_payments.total)?;

        writeln!(f, "Crop payments")?;
        let mut any = false;
        for (crop, amount) in result.crop_payments.line_items() {
            if amount != 0.0 {
                let label = format!("{} ({:.2} ha)", crop.label(), farm.crops.area(crop));
                self.line(f, &label, amount)?;
                any = true;
            }
        }
        if !any {
            writeln!(f, "  (none)")?;
        }
        self.section_total(f, result.crop_payments.total)?;

        writeln!(f, "Animal payments")?;
        let mut any = false;
        for (animal, amount) in result.animal_payments.line_items() {
            if amount != 0.0 {
                let label = format!("{} ({} head)", animal.label(), farm.animals.count(animal));
                self.line(f, &label, amount)?;
                any = true;
            }
        }
        if !any {
            writeln!(f, "  (none)")?;
        }
        self.section_total(f, result.animal_payments.total)?;

        writeln!(f, "Ecoschemes")?;
        let mut any = false;
        for (scheme, amount) in result.ecoschemes.line_items() {
            if amount != 0.0 {
                let label = format!("{} ({:.2} ha)", scheme.label(), farm.ecoschemes.area(scheme));
                self.line(f, &label, amount)?;
                any = true;
            }
        }
        if !any {
            writeln!(f, "  (none)")?;
        }
        self.section_total(f, result.ecoschemes.total)?;

        writeln!(f, "{}", "=".repeat(LABEL_WIDTH + AMOUNT_WIDTH + 2))?;
        writeln!(
            f,
            "  {:<lw$}{:>aw$}",
            "GRAND TOTAL",
            format_amount(result.grand_total_converted, result.currency),
            lw = LABEL_WIDTH,
            aw = AMOUNT_WIDTH
        )?;

        if !self.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "Warnings")?;
            for warning in self.warnings {
                writeln!(f, "  ! {}", warning)?;
            }
        }

        writeln!(f)?;
        write!(f, "Source: {}", RATES_SOURCE)
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

// =============================================================================
// CSV Export
// =============================================================================

/// Plain two-decimal rendering used in machine-readable exports.
pub fn format_plain(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Spreadsheet export of the category totals.
///
/// ## Layout
/// ```text
/// "Category","Amount","Currency"
/// "Direct Payments","7441.34","PLN"
/// ...
/// "Total","12345.67","PLN"
/// "","",""
/// "Calculation Date","2025-05-20",""
/// "Currency","PLN",""
/// "Source","ARiMR/MRiRW 2025",""
/// ```
/// Every cell is quoted and the text starts with a UTF-8 byte order mark
/// so spreadsheet tools detect the encoding.
pub fn render_csv(result: &CalculationResult, schedule: &RateSchedule, date: NaiveDate) -> String {
    let currency = result.currency;
    let code = currency.code();
    let amount = |base: f64| format_plain(convert(base, currency, schedule));

    let rows: [[String; 3]; 10] = [
        ["Category".into(), "Amount".into(), "Currency".into()],
        ["Direct Payments".into(), amount(result.direct_payments.total), code.into()],
        ["Crop Payments".into(), amount(result.crop_payments.total), code.into()],
        ["Animal Payments".into(), amount(result.animal_payments.total), code.into()],
        ["Ecoschemes".into(), amount(result.ecoschemes.total), code.into()],
        ["Total".into(), format_plain(result.grand_total_converted), code.into()],
        [String::new(), String::new(), String::new()],
        [
            "Calculation Date".into(),
            date.format("%Y-%m-%d").to_string(),
            String::new(),
        ],
        ["Currency".into(), code.into(), String::new()],
        ["Source".into(), RATES_SOURCE.into(), String::new()],
    ];

    let body = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| quote_cell(cell))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("\u{feff}{}", body)
}

/// File name the export is saved under when only a directory is given.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("agricultural-subsidies-{}.csv", date.format("%Y-%m-%d"))
}

fn quote_cell(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

// =============================================================================
// JSON
// =============================================================================

/// Pretty JSON with the same camelCase field names as the bindings.
pub fn render_json<T: serde::Serialize>(value: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

// =============================================================================
// Rate Table
// =============================================================================

/// Every rate of a schedule, converted into one display currency.
pub struct RatesTable<'a> {
    pub schedule: &'a RateSchedule,
    pub currency: Currency,
}

impl RatesTable<'_> {
    fn rate(&self, f: &mut fmt::Formatter<'_>, label: &str, base: f64, unit: &str) -> fmt::Result {
        writeln!(
            f,
            "  {:<lw$}{:>aw$} {}",
            label,
            format_amount(convert(base, self.currency, self.schedule), self.currency),
            unit,
            lw = LABEL_WIDTH,
            aw = AMOUNT_WIDTH
        )
    }
}

impl fmt::Display for RatesTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.schedule;
        let title = format!(
            "Payment rates {} (base {}, shown in {})",
            s.program_year, s.base_currency, self.currency
        );
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "=".repeat(title.chars().count()))?;

        writeln!(f, "Direct payments")?;
        let direct = &s.direct_payments;
        self.rate(f, "Basic income support", direct.basic_income_support, "/ha")?;
        self.rate(
            f,
            &format!("Redistributive payment (first {} ha)", s.limits.redistributive_max_ha),
            direct.redistributive_payment,
            "/ha",
        )?;
        self.rate(f, "Young farmers payment", direct.young_farmers_payment, "/ha")?;
        self.rate(
            f,
            &format!("Small farms payment (up to {} ha)", s.limits.small_farms_max_ha),
            direct.small_farms_payment,
            "/ha",
        )?;
        self.rate(f, "Small farms payment cap", s.limits.small_farms_payment_cap, "")?;
        self.rate(
            f,
            "Supplementary basic payment",
            direct.supplementary_basic_payment,
            "/ha",
        )?;
        writeln!(f)?;

        writeln!(f, "Crop payments")?;
        for crop in Crop::ALL {
            self.rate(f, crop.label(), s.crop_payments.rate(crop), "/ha")?;
        }
        writeln!(f)?;

        writeln!(f, "Animal payments")?;
        for animal in AnimalType::ALL {
            let entry = s.animal_payments.get(animal);
            let label = match entry.limit {
                Some(limit) => format!("{} (max {} head)", animal.label(), limit),
                None => animal.label().to_string(),
            };
            self.rate(f, &label, entry.rate, "/head")?;
        }
        writeln!(f)?;

        writeln!(f, "Ecoschemes (advisory cap {} ha)", s.limits.ecoschemes_max_ha)?;
        for scheme in Ecoscheme::ALL {
            self.rate(f, scheme.label(), s.ecoschemes.rate(scheme), "/ha")?;
        }
        writeln!(f)?;

        writeln!(f, "Conversion factors")?;
        for currency in Currency::ALL {
            writeln!(
                f,
                "  1 {} = {} {}",
                s.base_currency,
                s.currency_rates.factor(currency),
                currency
            )?;
        }
        Ok(())
    }
}

// =============================================================================
// Calendar
// =============================================================================

/// Campaign deadlines and where `today` falls within them.
pub struct CalendarView<'a> {
    pub program_year: i32,
    pub calendar: &'a ProgramCalendar,
    pub today: NaiveDate,
}

impl fmt::Display for CalendarView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.calendar;
        writeln!(f, "Program calendar {}", self.program_year)?;
        writeln!(f, "  Application window:   {} to {}", c.application_start, c.application_end)?;
        writeln!(f, "  Late submission until: {}", c.late_submission_end)?;
        writeln!(f, "  Changes deadline:      {}", c.changes_deadline)?;
        writeln!(f, "  Payment period:        {} to {}", c.payment_start, c.payment_end)?;
        writeln!(f)?;
        writeln!(f, "On {}: {}", self.today, c.phase_on(self.today).label())?;
        write!(
            f,
            "Payments: {}",
            if c.is_payment_period(self.today) {
                "in progress"
            } else {
                "not in progress"
            }
        )
    }
}
