// src/services/ledger.rs

//! Motor de métricas derivadas sobre a lista completa de leads.
//!
//! Tudo aqui é função pura de `(leads, ofertas, filtros, data de referência)`:
//! nada lê o relógio, nada é cacheado, e cada chamada recalcula do zero.
//! Leads `Abandoned` só aparecem na visão `Incomplete`.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::{
    common::dates,
    models::{
        dashboard::{
            CalendarDay, CalendarMonth, FinancialSummary, OfferActiveCount, OfferFinancials,
            Timeframe, ViewMode,
        },
        lead::{Lead, LeadStatus},
        offer::Offer,
    },
    services::price::parse_average_price,
};

/// Como um lead elegível entra na visão financeira. Exaustivo e exclusivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Completed,
    Lost,
    Pending,
}

pub struct LeadLedger<'a> {
    leads: &'a [Lead],
    offers: &'a [Offer],
}

impl<'a> LeadLedger<'a> {
    pub fn new(leads: &'a [Lead], offers: &'a [Offer]) -> Self {
        Self { leads, offers }
    }

    // =========================================================================
    //  1. CONTAGEM ATIVA POR OFERTA
    // =========================================================================

    fn is_active(lead: &Lead, view: ViewMode) -> bool {
        match view {
            ViewMode::Incomplete => lead.status == LeadStatus::Abandoned,
            ViewMode::Incoming => {
                lead.status != LeadStatus::Completed && lead.status != LeadStatus::Abandoned
            }
            ViewMode::Retention => lead.status == LeadStatus::Completed,
        }
    }

    pub fn active_count(&self, offer_id: i32, view: ViewMode) -> usize {
        self.leads
            .iter()
            .filter(|l| l.offer_id == offer_id && Self::is_active(l, view))
            .count()
    }

    /// Total histórico da oferta, qualquer status.
    pub fn total_count(&self, offer_id: i32) -> usize {
        self.leads.iter().filter(|l| l.offer_id == offer_id).count()
    }

    pub fn active_counts(&self, view: ViewMode) -> Vec<OfferActiveCount> {
        self.offers
            .iter()
            .map(|offer| OfferActiveCount {
                offer_id: offer.id,
                buy_item: offer.buy_item,
                active_count: self.active_count(offer.id, view),
                total_count: self.total_count(offer.id),
            })
            .collect()
    }

    // =========================================================================
    //  2. OCUPAÇÃO DO CALENDÁRIO
    // =========================================================================

    fn on_date(lead: &Lead, date: NaiveDate, view: ViewMode) -> bool {
        match view {
            ViewMode::Incomplete => lead.is_abandoned() && lead.appointment_day() == Some(date),
            ViewMode::Incoming => !lead.is_abandoned() && lead.appointment_day() == Some(date),
            ViewMode::Retention => !lead.is_abandoned() && lead.follow_up_date == Some(date),
        }
    }

    pub fn calendar_count(&self, date: NaiveDate, view: ViewMode) -> usize {
        self.leads
            .iter()
            .filter(|l| Self::on_date(l, date, view))
            .count()
    }

    /// `first_day` precisa ser o dia 1 do mês.
    pub fn calendar_month(&self, first_day: NaiveDate, view: ViewMode) -> CalendarMonth {
        let days = dates::days_of_month(first_day)
            .into_iter()
            .map(|date| CalendarDay {
                date,
                count: self.calendar_count(date, view),
            })
            .collect();

        CalendarMonth {
            month: dates::month_key(first_day),
            view,
            leading_blank_days: first_day.weekday().num_days_from_sunday(),
            days,
        }
    }

    /// Lista do dia selecionado, já ordenada como o painel mostra.
    /// Na visão `Incomplete` o filtro de serviço é ignorado.
    pub fn day_view(
        &self,
        date: NaiveDate,
        view: ViewMode,
        service_filter: Option<i32>,
    ) -> Vec<&'a Lead> {
        let mut rows: Vec<&'a Lead> = self
            .leads
            .iter()
            .filter(|l| Self::on_date(l, date, view))
            .filter(|l| match (view, service_filter) {
                (ViewMode::Incomplete, _) | (_, None) => true,
                (_, Some(offer_id)) => l.offer_id == offer_id,
            })
            .collect();

        match view {
            ViewMode::Incomplete => rows.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at)),
            ViewMode::Incoming => rows.sort_by(|a, b| a.appointment_time.cmp(&b.appointment_time)),
            ViewMode::Retention => rows.sort_by(|a, b| a.name.cmp(&b.name)),
        }
        rows
    }

    // =========================================================================
    //  3. VISÃO FINANCEIRA
    // =========================================================================

    fn is_eligible(lead: &Lead, timeframe: Timeframe, today: NaiveDate) -> bool {
        if lead.is_abandoned() {
            return false;
        }
        match timeframe {
            Timeframe::AllTime => true,
            // Sentinelas ("N/A") e datas fora do formato ISO ficam de fora do mês
            Timeframe::ThisMonth => lead
                .appointment_day()
                .is_some_and(|day| dates::same_month(day, today)),
        }
    }

    fn classify(lead: &Lead, today: NaiveDate) -> Outcome {
        if lead.status == LeadStatus::Completed {
            return Outcome::Completed;
        }
        match lead.appointment_day() {
            Some(day) if day < today => Outcome::Lost,
            _ => Outcome::Pending,
        }
    }

    pub fn financials(&self, timeframe: Timeframe, today: NaiveDate) -> FinancialSummary {
        let eligible: Vec<&Lead> = self
            .leads
            .iter()
            .filter(|l| Self::is_eligible(l, timeframe, today))
            .collect();

        let breakdown: Vec<OfferFinancials> = self
            .offers
            .iter()
            .map(|offer| {
                let avg_price = parse_average_price(offer.buy_price);
                let (mut completed, mut lost, mut pending) = (0usize, 0usize, 0usize);

                for lead in eligible.iter().filter(|l| l.offer_id == offer.id) {
                    match Self::classify(lead, today) {
                        Outcome::Completed => completed += 1,
                        Outcome::Lost => lost += 1,
                        Outcome::Pending => pending += 1,
                    }
                }
                let total = completed + lost + pending;

                OfferFinancials {
                    offer_id: offer.id,
                    buy_item: offer.buy_item,
                    buy_price: offer.buy_price,
                    avg_price,
                    total_count: total,
                    completed_count: completed,
                    lost_count: lost,
                    pending_count: pending,
                    potential_revenue: avg_price * Decimal::from(total),
                    actual_revenue: avg_price * Decimal::from(completed),
                    lost_revenue: avg_price * Decimal::from(lost),
                }
            })
            .collect();

        FinancialSummary {
            timeframe,
            reference_date: today,
            total_potential: breakdown.iter().map(|b| b.potential_revenue).sum(),
            total_actual: breakdown.iter().map(|b| b.actual_revenue).sum(),
            total_loss: breakdown.iter().map(|b| b.lost_revenue).sum(),
            breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OFFERS;
    use chrono::{TimeZone, Utc};

    fn day(s: &str) -> NaiveDate {
        dates::parse_iso_date(s).unwrap()
    }

    fn lead(id: &str, offer_id: i32, status: LeadStatus, date: &str) -> Lead {
        Lead {
            id: id.to_string(),
            name: format!("Client {id}"),
            phone: format!("0171000{id:0>4}"),
            offer_id,
            branch_name: "Dhanmondi".to_string(),
            appointment_date: date.to_string(),
            appointment_time: "12:00".to_string(),
            submitted_at: Utc.with_ymd_and_hms(2026, 10, 1, 8, 0, 0).unwrap(),
            status,
            follow_up_date: None,
            follow_up_status: None,
            next_follow_up: None,
            notes: None,
        }
    }

    #[test]
    fn premium_facial_scenario() {
        let today = day("2026-10-17");
        let leads = vec![
            lead("1", 1, LeadStatus::Completed, "2026-10-02"),
            lead("2", 1, LeadStatus::Completed, "2026-10-10"),
            lead("3", 1, LeadStatus::New, "2026-10-25"),
            lead("4", 1, LeadStatus::New, "2026-10-05"),
        ];
        let ledger = LeadLedger::new(&leads, OFFERS);

        for timeframe in [Timeframe::ThisMonth, Timeframe::AllTime] {
            let summary = ledger.financials(timeframe, today);
            let facial = &summary.breakdown[0];
            assert_eq!(facial.avg_price, Decimal::from(3600));
            assert_eq!(facial.completed_count, 2);
            assert_eq!(facial.lost_count, 1);
            assert_eq!(facial.pending_count, 1);
            assert_eq!(facial.actual_revenue, Decimal::from(7200));
            assert_eq!(facial.lost_revenue, Decimal::from(3600));
            assert_eq!(facial.potential_revenue, Decimal::from(14400));
            assert_eq!(summary.total_potential, Decimal::from(14400));
        }
    }

    #[test]
    fn abandoned_is_invisible_outside_incomplete() {
        let today = day("2026-10-17");
        let mut draft = lead("9", 2, LeadStatus::Abandoned, "2026-10-17");
        draft.follow_up_date = Some(today);
        let leads = vec![draft];
        let ledger = LeadLedger::new(&leads, OFFERS);

        assert_eq!(ledger.active_count(2, ViewMode::Incoming), 0);
        assert_eq!(ledger.active_count(2, ViewMode::Retention), 0);
        assert_eq!(ledger.active_count(2, ViewMode::Incomplete), 1);
        assert_eq!(ledger.calendar_count(today, ViewMode::Incoming), 0);
        assert_eq!(ledger.calendar_count(today, ViewMode::Retention), 0);
        assert_eq!(ledger.calendar_count(today, ViewMode::Incomplete), 1);

        let summary = ledger.financials(Timeframe::AllTime, today);
        assert!(summary.breakdown.iter().all(|b| b.total_count == 0));
        assert_eq!(ledger.total_count(2), 1);
    }

    #[test]
    fn sentinel_dates_count_only_all_time_and_never_lost() {
        let today = day("2026-10-17");
        let leads = vec![
            lead("1", 3, LeadStatus::New, "N/A"),
            lead("2", 3, LeadStatus::Contacted, ""),
        ];
        let ledger = LeadLedger::new(&leads, OFFERS);

        let month = ledger.financials(Timeframe::ThisMonth, today);
        assert_eq!(month.breakdown[2].total_count, 0);

        let all = ledger.financials(Timeframe::AllTime, today);
        let pedi = &all.breakdown[2];
        assert_eq!(pedi.total_count, 2);
        assert_eq!(pedi.lost_count, 0);
        assert_eq!(pedi.pending_count, 2);
    }

    #[test]
    fn breakdown_partitions_every_offer() {
        let today = day("2026-10-17");
        let statuses = [
            LeadStatus::New,
            LeadStatus::Contacted,
            LeadStatus::Completed,
            LeadStatus::Abandoned,
        ];
        let dates_pool = ["2026-10-01", "2026-10-17", "2026-10-30", "2026-09-12", "N/A"];
        let leads: Vec<Lead> = (0..60)
            .map(|i| {
                lead(
                    &i.to_string(),
                    (i % 11) + 1,
                    statuses[i as usize % statuses.len()],
                    dates_pool[i as usize % dates_pool.len()],
                )
            })
            .collect();
        let ledger = LeadLedger::new(&leads, OFFERS);

        for timeframe in [Timeframe::ThisMonth, Timeframe::AllTime] {
            for row in ledger.financials(timeframe, today).breakdown {
                assert_eq!(
                    row.pending_count + row.completed_count + row.lost_count,
                    row.total_count
                );
            }
        }
    }

    #[test]
    fn active_counts_follow_view() {
        let leads = vec![
            lead("1", 4, LeadStatus::New, "2026-10-20"),
            lead("2", 4, LeadStatus::Contacted, "2026-10-20"),
            lead("3", 4, LeadStatus::Completed, "2026-10-20"),
            lead("4", 4, LeadStatus::Abandoned, "2026-10-20"),
        ];
        let ledger = LeadLedger::new(&leads, OFFERS);

        let incoming = ledger.active_counts(ViewMode::Incoming);
        assert_eq!(incoming.len(), OFFERS.len());
        assert_eq!(incoming[3].active_count, 2);
        assert_eq!(incoming[3].total_count, 4);
        assert_eq!(ledger.active_count(4, ViewMode::Retention), 1);
        assert_eq!(ledger.active_count(4, ViewMode::Incomplete), 1);
        // Id fora do catálogo não quebra nada
        assert_eq!(ledger.active_count(404, ViewMode::Incoming), 0);
    }

    #[test]
    fn day_view_sorting_and_filter() {
        let date = day("2026-10-20");
        let mut a = lead("a", 1, LeadStatus::New, "2026-10-20");
        a.appointment_time = "17:00".into();
        a.name = "Zara".into();
        let mut b = lead("b", 2, LeadStatus::Contacted, "2026-10-20");
        b.appointment_time = "09:30".into();
        b.name = "Amina".into();
        let mut c = lead("c", 1, LeadStatus::Completed, "2026-09-01");
        c.follow_up_date = Some(date);
        c.name = "Mitu".into();
        let mut d = lead("d", 1, LeadStatus::Completed, "2026-09-01");
        d.follow_up_date = Some(date);
        d.name = "Bristi".into();
        let mut e = lead("e", 1, LeadStatus::Abandoned, "2026-10-20");
        e.submitted_at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
        let mut f = lead("f", 5, LeadStatus::Abandoned, "2026-10-20");
        f.submitted_at = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        let leads = vec![a, b, c, d, e, f];
        let ledger = LeadLedger::new(&leads, OFFERS);

        let ids = |rows: Vec<&Lead>| rows.iter().map(|l| l.id.clone()).collect::<Vec<_>>();

        assert_eq!(ids(ledger.day_view(date, ViewMode::Incoming, None)), ["b", "a"]);
        assert_eq!(ids(ledger.day_view(date, ViewMode::Incoming, Some(1))), ["a"]);
        assert_eq!(ids(ledger.day_view(date, ViewMode::Retention, None)), ["d", "c"]);
        assert_eq!(ids(ledger.day_view(date, ViewMode::Incomplete, Some(1))), ["f", "e"]);
    }

    #[test]
    fn calendar_month_has_every_day() {
        let mut follow = lead("1", 1, LeadStatus::Completed, "2026-10-03");
        follow.follow_up_date = Some(day("2026-11-02"));
        let leads = vec![lead("2", 1, LeadStatus::New, "2026-11-02"), follow];
        let ledger = LeadLedger::new(&leads, OFFERS);

        let month = ledger.calendar_month(day("2026-11-01"), ViewMode::Retention);
        assert_eq!(month.days.len(), 30);
        assert_eq!(month.month, "2026-11");
        // 1º de novembro de 2026 é um domingo
        assert_eq!(month.leading_blank_days, 0);
        assert_eq!(month.days[1].count, 1);
        assert_eq!(month.days.iter().map(|d| d.count).sum::<usize>(), 1);
    }
}
