// src/services/selection.rs

//! Estado de visualização do painel (data, filtro, aba e seleção) como um
//! valor explícito, mais a exportação CSV e a cópia de telefones.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    catalog,
    common::error::AppError,
    models::{dashboard::ViewMode, lead::Lead, offer::Offer},
    services::ledger::LeadLedger,
};

const CSV_HEADER: [&str; 7] = ["Name", "Phone", "Service", "Price Range", "Status", "Date", "Outcome"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    #[serde(default)]
    pub view: ViewMode,
    #[schema(value_type = String, format = Date, example = "2026-10-17")]
    pub selected_date: NaiveDate,
    #[serde(default)]
    pub service_filter: Option<i32>,
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub selected: BTreeSet<String>,
}

impl ViewState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            view: ViewMode::default(),
            selected_date: today,
            service_filter: None,
            selected: BTreeSet::new(),
        }
    }

    // Trocar de aba limpa seleção e filtro
    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
        self.service_filter = None;
        self.selected.clear();
    }

    // A seleção não sobrevive a mudança de data ou de filtro
    pub fn set_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.selected.clear();
    }

    pub fn set_service_filter(&mut self, offer_id: Option<i32>) {
        self.service_filter = offer_id;
        self.selected.clear();
    }

    pub fn toggle_one(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    /// Alterna entre "nada" e "tudo o que está visível".
    pub fn toggle_all(&mut self, visible: &[&Lead]) {
        if !visible.is_empty() && self.selected.len() == visible.len() {
            self.selected.clear();
        } else {
            self.selected = visible.iter().map(|l| l.id.clone()).collect();
        }
    }

    pub fn visible<'a>(&self, ledger: &LeadLedger<'a>) -> Vec<&'a Lead> {
        ledger.day_view(self.selected_date, self.view, self.service_filter)
    }

    fn selected_from<'a>(&self, visible: &[&'a Lead]) -> Vec<&'a Lead> {
        visible
            .iter()
            .copied()
            .filter(|l| self.selected.contains(&l.id))
            .collect()
    }

    /// Com seleção, só os selecionados; sem seleção, a lista visível inteira.
    pub fn export_rows<'a>(&self, visible: &[&'a Lead]) -> Result<Vec<&'a Lead>, AppError> {
        let rows = if self.selected.is_empty() {
            visible.to_vec()
        } else {
            self.selected_from(visible)
        };
        if rows.is_empty() {
            return Err(AppError::NothingToExport);
        }
        Ok(rows)
    }

    /// Telefones separados por vírgula; só da seleção, sem fallback.
    pub fn copy_phones(&self, visible: &[&Lead]) -> Result<(String, usize), AppError> {
        let selected = self.selected_from(visible);
        if selected.is_empty() {
            return Err(AppError::EmptySelection);
        }
        let phones = selected
            .iter()
            .map(|l| l.phone.as_str())
            .collect::<Vec<_>>()
            .join(",");
        Ok((phones, selected.len()))
    }

    pub fn export_filename(&self) -> String {
        format!("lingering_contacts_{}.csv", self.selected_date)
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Uma linha por lead mais o cabeçalho; todos os campos entre aspas.
pub fn to_csv(rows: &[&Lead], offers: &[Offer], view: ViewMode) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_HEADER.map(quote).join(","));

    for lead in rows {
        let offer = catalog::find_offer(offers, lead.offer_id);
        let date = match view {
            ViewMode::Retention => lead
                .follow_up_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            ViewMode::Incoming | ViewMode::Incomplete => lead.appointment_date.clone(),
        };
        let fields = [
            lead.name.as_str(),
            lead.phone.as_str(),
            offer.map(|o| o.buy_item).unwrap_or("Unknown"),
            offer.map(|o| o.buy_price).unwrap_or("0"),
            lead.status.as_str(),
            date.as_str(),
            lead.outcome_label(),
        ];
        lines.push(fields.map(quote).join(","));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OFFERS;
    use crate::models::lead::{FollowUpStatus, LeadStatus};
    use chrono::{TimeZone, Utc};

    fn lead(id: &str, name: &str, phone: &str, offer_id: i32) -> Lead {
        Lead {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
            offer_id,
            branch_name: "Dhanmondi".into(),
            appointment_date: "2026-10-20".into(),
            appointment_time: "10:00".into(),
            submitted_at: Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap(),
            status: LeadStatus::New,
            follow_up_date: None,
            follow_up_status: None,
            next_follow_up: None,
            notes: None,
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn select_all_then_date_change_clears() {
        let leads: Vec<Lead> = (1..=5)
            .map(|i| lead(&i.to_string(), "A", "01700000000", 1))
            .collect();
        let ledger = LeadLedger::new(&leads, OFFERS);
        let mut state = ViewState::new(date("2026-10-20"));

        let visible = state.visible(&ledger);
        assert_eq!(visible.len(), 5);
        state.toggle_all(&visible);
        assert_eq!(state.selected.len(), 5);

        state.set_date(date("2026-10-21"));
        assert!(state.selected.is_empty());

        state.toggle_all(&visible);
        state.set_service_filter(Some(2));
        assert!(state.selected.is_empty());
    }

    #[test]
    fn toggle_all_twice_empties_and_toggle_one_flips() {
        let leads = vec![lead("a", "A", "1", 1), lead("b", "B", "2", 1)];
        let refs: Vec<&Lead> = leads.iter().collect();
        let mut state = ViewState::new(date("2026-10-20"));

        state.toggle_all(&refs);
        state.toggle_all(&refs);
        assert!(state.selected.is_empty());

        // Lista vazia nunca "seleciona tudo"
        state.toggle_all(&[]);
        assert!(state.selected.is_empty());

        state.toggle_one("a");
        state.toggle_one("b");
        state.toggle_one("a");
        assert_eq!(state.selected.iter().collect::<Vec<_>>(), ["b"]);
    }

    #[test]
    fn export_prefers_selection_and_falls_back_to_visible() {
        let leads = vec![lead("a", "A", "1", 1), lead("b", "B", "2", 1), lead("c", "C", "3", 1)];
        let refs: Vec<&Lead> = leads.iter().collect();
        let mut state = ViewState::new(date("2026-10-20"));

        assert_eq!(state.export_rows(&refs).unwrap().len(), 3);
        assert!(matches!(state.copy_phones(&refs), Err(AppError::EmptySelection)));

        state.toggle_one("c");
        state.toggle_one("a");
        let rows = state.export_rows(&refs).unwrap();
        assert_eq!(rows.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), ["a", "c"]);
        assert_eq!(state.copy_phones(&refs).unwrap(), ("1,3".to_string(), 2));

        let empty = ViewState::new(date("2026-10-20"));
        assert!(matches!(empty.export_rows(&[]), Err(AppError::NothingToExport)));
    }

    #[test]
    fn csv_quotes_every_field_and_escapes_quotes() {
        let mut tricky = lead("a", "Rumana \"Ruma\" Akter", "017\"12", 1);
        tricky.status = LeadStatus::Completed;
        tricky.follow_up_date = Some(date("2026-11-19"));
        tricky.follow_up_status = Some(FollowUpStatus::Called);
        let unknown = lead("b", "Lima", "01811111111", 99);
        let rows = vec![&tricky, &unknown];

        let csv = to_csv(&rows, OFFERS, ViewMode::Retention);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "\"Name\",\"Phone\",\"Service\",\"Price Range\",\"Status\",\"Date\",\"Outcome\""
        );
        assert_eq!(
            lines[1],
            "\"Rumana \"\"Ruma\"\" Akter\",\"017\"\"12\",\"Premium Facial\",\"3,200 - 4,000\",\"Completed\",\"2026-11-19\",\"Called\""
        );
        assert_eq!(
            lines[2],
            "\"Lima\",\"01811111111\",\"Unknown\",\"0\",\"New\",\"\",\"Pending\""
        );

        let incoming = to_csv(&rows[1..], OFFERS, ViewMode::Incoming);
        assert!(incoming.ends_with("\"New\",\"2026-10-20\",\"Pending\""));
    }

    #[test]
    fn view_state_round_trips_through_json_with_defaults() {
        let state: ViewState = serde_json::from_str(r#"{"selectedDate":"2026-10-17"}"#).unwrap();
        assert_eq!(state.view, ViewMode::Incoming);
        assert!(state.selected.is_empty());
        assert_eq!(state.export_filename(), "lingering_contacts_2026-10-17.csv");
    }
}
