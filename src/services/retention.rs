// src/services/retention.rs

//! Ciclo de vida do lead: `New -> {Contacted, Completed}`, `Abandoned -> New`
//! (só via upsert), e o sub-quadro de follow-up depois de `Completed`.
//!
//! Cada função recebe o registro atual e devolve o registro completo novo;
//! quem chama grava o registro inteiro (read-modify-write, último vence).

use chrono::NaiveDate;

use crate::{
    common::{dates, error::AppError},
    models::lead::{FollowUpStatus, Lead, LeadStatus},
};

/// Dias sugeridos para a ligação de retenção.
pub const DEFAULT_FOLLOW_UP_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertDecision {
    Store,
    /// Rascunho atrasado ou reenvio sobre lead já trabalhado: descartado em silêncio
    IgnoreStale,
}

/// Regra de upsert por id: grava sobre registro inexistente ou `Abandoned`,
/// e `New` só sobre `New`. Lead já trabalhado (`Contacted`, `Completed`)
/// nunca é tocado pelo formulário público.
pub fn upsert_decision(existing: Option<&Lead>, incoming: &Lead) -> UpsertDecision {
    match existing.map(|l| l.status) {
        None | Some(LeadStatus::Abandoned) => UpsertDecision::Store,
        Some(LeadStatus::New) if incoming.status == LeadStatus::New => UpsertDecision::Store,
        Some(_) => UpsertDecision::IgnoreStale,
    }
}

fn ensure_not_abandoned(lead: &Lead, action: &'static str) -> Result<(), AppError> {
    if lead.is_abandoned() {
        return Err(AppError::InvalidTransition {
            from: lead.status,
            action,
        });
    }
    Ok(())
}

/// Mudança de status feita pelo operador (inclusive em massa).
/// Só `Contacted` e `Completed` são alvos válidos.
pub fn change_status(lead: &Lead, target: LeadStatus) -> Result<Lead, AppError> {
    match target {
        LeadStatus::Contacted => {
            ensure_not_abandoned(lead, "mark as contacted")?;
            // Follow-up já agendado continua lá mesmo se voltar para Contacted
            Ok(Lead {
                status: LeadStatus::Contacted,
                ..lead.clone()
            })
        }
        LeadStatus::Completed => mark_completed(lead),
        LeadStatus::New | LeadStatus::Abandoned => Err(AppError::InvalidTransition {
            from: lead.status,
            action: "manually set status of",
        }),
    }
}

pub fn mark_completed(lead: &Lead) -> Result<Lead, AppError> {
    ensure_not_abandoned(lead, "mark as completed")?;
    Ok(Lead {
        status: LeadStatus::Completed,
        ..lead.clone()
    })
}

/// Agenda a ligação de retenção; garante `Completed` e reinicia o resultado.
pub fn schedule_follow_up(lead: &Lead, date: NaiveDate) -> Result<Lead, AppError> {
    ensure_not_abandoned(lead, "schedule a follow-up for")?;

    Ok(Lead {
        status: LeadStatus::Completed,
        follow_up_date: Some(date),
        follow_up_status: Some(FollowUpStatus::Pending),
        ..lead.clone()
    })
}

pub fn default_follow_up_date(today: NaiveDate) -> NaiveDate {
    dates::plus_days(today, DEFAULT_FOLLOW_UP_DAYS)
}

/// Registra o resultado da ligação. Não mexe em `status` nem na data;
/// o operador pode trocar livremente entre Called, Converted e Missed.
pub fn record_outcome(lead: &Lead, outcome: FollowUpStatus) -> Result<Lead, AppError> {
    ensure_not_abandoned(lead, "record a retention outcome for")?;
    if outcome == FollowUpStatus::Pending {
        return Err(AppError::InvalidTransition {
            from: lead.status,
            action: "reset the outcome to Pending without rescheduling",
        });
    }
    if lead.follow_up_date.is_none() {
        return Err(AppError::InvalidTransition {
            from: lead.status,
            action: "record a retention outcome without a follow-up date for",
        });
    }

    Ok(Lead {
        follow_up_status: Some(outcome),
        ..lead.clone()
    })
}

pub fn attach_note(lead: &Lead, note: &str) -> Lead {
    let trimmed = note.trim();
    Lead {
        notes: (!trimmed.is_empty()).then(|| trimmed.to_string()),
        ..lead.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn lead(status: LeadStatus) -> Lead {
        Lead {
            id: "x".into(),
            name: "Shathi".into(),
            phone: "01812345678".into(),
            offer_id: 2,
            branch_name: "Mohammadpur".into(),
            appointment_date: "2026-10-10".into(),
            appointment_time: "11:00".into(),
            submitted_at: Utc.with_ymd_and_hms(2026, 10, 9, 8, 0, 0).unwrap(),
            status,
            follow_up_date: None,
            follow_up_status: None,
            next_follow_up: None,
            notes: None,
        }
    }

    fn date(s: &str) -> NaiveDate {
        dates::parse_iso_date(s).unwrap()
    }

    #[test]
    fn drafts_graduate_once_and_never_regress() {
        let draft = lead(LeadStatus::Abandoned);
        let submitted = lead(LeadStatus::New);

        assert_eq!(upsert_decision(None, &draft), UpsertDecision::Store);
        assert_eq!(upsert_decision(Some(&draft), &submitted), UpsertDecision::Store);
        assert_eq!(upsert_decision(Some(&draft), &draft), UpsertDecision::Store);
        assert_eq!(upsert_decision(Some(&submitted), &submitted), UpsertDecision::Store);
        assert_eq!(
            upsert_decision(Some(&submitted), &draft),
            UpsertDecision::IgnoreStale
        );
    }

    #[test]
    fn resubmission_never_rewinds_a_worked_lead() {
        let resubmitted = lead(LeadStatus::New);
        for status in [LeadStatus::Contacted, LeadStatus::Completed] {
            let mut worked = lead(status);
            worked.notes = Some("VIP".into());
            assert_eq!(
                upsert_decision(Some(&worked), &resubmitted),
                UpsertDecision::IgnoreStale
            );
            assert_eq!(
                upsert_decision(Some(&worked), &lead(LeadStatus::Abandoned)),
                UpsertDecision::IgnoreStale
            );
        }
    }

    #[test]
    fn mark_completed_leaves_follow_up_alone() {
        let done = mark_completed(&lead(LeadStatus::New)).unwrap();
        assert_eq!(done.status, LeadStatus::Completed);
        assert!(mark_completed(&lead(LeadStatus::Abandoned)).is_err());
        assert_eq!(done.follow_up_date, None);
        assert_eq!(done.follow_up_status, None);
    }

    #[test]
    fn schedule_forces_completed_and_resets_outcome() {
        let mut called = lead(LeadStatus::Completed);
        called.follow_up_date = Some(date("2026-11-01"));
        called.follow_up_status = Some(FollowUpStatus::Called);

        let from_contacted = schedule_follow_up(&lead(LeadStatus::Contacted), date("2026-11-09")).unwrap();
        assert_eq!(from_contacted.status, LeadStatus::Completed);
        assert_eq!(from_contacted.follow_up_date, Some(date("2026-11-09")));
        assert_eq!(from_contacted.follow_up_status, Some(FollowUpStatus::Pending));

        let rescheduled = schedule_follow_up(&called, date("2026-12-01")).unwrap();
        assert_eq!(rescheduled.follow_up_status, Some(FollowUpStatus::Pending));
        assert_eq!(default_follow_up_date(date("2026-10-17")), date("2026-11-16"));
    }

    #[test]
    fn outcomes_move_freely_without_touching_schedule() {
        let scheduled = schedule_follow_up(&lead(LeadStatus::Completed), date("2026-11-09")).unwrap();
        let missed = record_outcome(&scheduled, FollowUpStatus::Missed).unwrap();
        let converted = record_outcome(&missed, FollowUpStatus::Converted).unwrap();
        assert_eq!(converted.follow_up_status, Some(FollowUpStatus::Converted));
        assert_eq!(converted.follow_up_date, scheduled.follow_up_date);
        assert_eq!(converted.status, LeadStatus::Completed);

        assert!(record_outcome(&scheduled, FollowUpStatus::Pending).is_err());
        assert!(record_outcome(&lead(LeadStatus::Completed), FollowUpStatus::Called).is_err());
    }

    #[test]
    fn reverting_to_contacted_keeps_follow_up() {
        let scheduled = schedule_follow_up(&lead(LeadStatus::New), date("2026-11-09")).unwrap();
        let reverted = change_status(&scheduled, LeadStatus::Contacted).unwrap();
        assert_eq!(reverted.status, LeadStatus::Contacted);
        assert_eq!(reverted.follow_up_date, Some(date("2026-11-09")));
    }

    #[test]
    fn abandoned_leads_reject_operator_transitions() {
        let draft = lead(LeadStatus::Abandoned);
        assert!(matches!(
            change_status(&draft, LeadStatus::Contacted),
            Err(AppError::InvalidTransition { .. })
        ));
        assert!(schedule_follow_up(&draft, date("2026-11-09")).is_err());
        assert!(change_status(&lead(LeadStatus::New), LeadStatus::Abandoned).is_err());
    }

    #[test]
    fn notes_are_trimmed_and_cleared() {
        let noted = attach_note(&lead(LeadStatus::Completed), "  wants evening slot ");
        assert_eq!(noted.notes.as_deref(), Some("wants evening slot"));
        assert_eq!(attach_note(&noted, "   ").notes, None);
    }
}
