// src/services/analytics.rs

use std::collections::HashMap;

use chrono::{DateTime, Duration, FixedOffset, Utc};
use url::Url;

use crate::{
    common::dates,
    models::{
        dashboard::{LabelCount, TrafficSummary},
        visit::Visit,
    },
};

pub const UNKNOWN_LOCATION: &str = "Unknown";
pub const DIRECT_SOURCE: &str = "Direct / Unknown";

/// Agrupa mantendo a ordem da primeira ocorrência e depois ordena por
/// contagem decrescente (sort estável: empates ficam na ordem de chegada).
fn count_by<'v>(labels: impl Iterator<Item = &'v str>) -> Vec<LabelCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<LabelCount> = Vec::new();

    for label in labels {
        match index.get(label) {
            Some(&pos) => counts[pos].count += 1,
            None => {
                index.insert(label, counts.len());
                counts.push(LabelCount {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Resumo de tráfego. "Hoje" é o dia local do negócio; a janela de 30 dias é
/// inclusiva e calculada por subtração de instantes.
pub fn traffic_summary(visits: &[Visit], now: DateTime<Utc>, offset: FixedOffset) -> TrafficSummary {
    let today = dates::local_date(now, offset);
    let window_start = now - Duration::days(30);

    TrafficSummary {
        visits_today: visits
            .iter()
            .filter(|v| dates::local_date(v.timestamp, offset) == today)
            .count(),
        visits_last_30_days: visits.iter().filter(|v| v.timestamp >= window_start).count(),
        total: visits.len(),
        sources: count_by(visits.iter().map(|v| v.source.as_str())),
        locations: count_by(
            visits
                .iter()
                .map(|v| v.location.as_deref().unwrap_or(UNKNOWN_LOCATION)),
        ),
    }
}

/// Classifica a origem da visita: parâmetro explícito `?source=` primeiro,
/// depois o referrer.
pub fn classify_source(source_param: Option<&str>, referrer: Option<&str>) -> String {
    if let Some(source) = source_param.map(str::trim).filter(|s| !s.is_empty()) {
        return source.to_string();
    }

    let Some(referrer) = referrer.map(str::trim).filter(|r| !r.is_empty()) else {
        return DIRECT_SOURCE.to_string();
    };

    let lowered = referrer.to_lowercase();
    if lowered.contains("facebook.com") || lowered.contains("fb.com") {
        "Facebook (Organic)".to_string()
    } else if lowered.contains("instagram.com") {
        "Instagram (Organic)".to_string()
    } else if lowered.contains("google.com") {
        "Google (Organic)".to_string()
    } else if lowered.contains("youtube.com") {
        "YouTube".to_string()
    } else {
        Url::parse(referrer)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| "External Website".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn visit(ts: DateTime<Utc>, source: &str, location: Option<&str>) -> Visit {
        Visit {
            timestamp: ts,
            source: source.to_string(),
            location: location.map(str::to_string),
        }
    }

    #[test]
    fn summary_groups_and_windows() {
        let dhaka = FixedOffset::east_opt(6 * 3600).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 10, 0, 0).unwrap();
        let visits = vec![
            // 2026-10-16 19:00 UTC = 2026-10-17 01:00 em Dhaka -> hoje
            visit(Utc.with_ymd_and_hms(2026, 10, 16, 19, 0, 0).unwrap(), "Google (Organic)", None),
            visit(now, "Facebook (Organic)", Some("Dhaka, Dhaka Division")),
            visit(now - Duration::days(30), "Facebook (Organic)", Some("Dhaka, Dhaka Division")),
            visit(now - Duration::days(31), "YouTube", Some("Chittagong, Chittagong")),
        ];

        let summary = traffic_summary(&visits, now, dhaka);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.visits_today, 2);
        assert_eq!(summary.visits_last_30_days, 3);
        assert_eq!(summary.sources[0].label, "Facebook (Organic)");
        assert_eq!(summary.sources[0].count, 2);
        assert_eq!(summary.sources[1].label, "Google (Organic)");
        assert_eq!(summary.locations[0].label, "Dhaka, Dhaka Division");
        assert!(summary.locations.iter().any(|l| l.label == UNKNOWN_LOCATION && l.count == 1));
    }

    #[test]
    fn classifies_referrers() {
        assert_eq!(classify_source(Some("fb_ad_oct"), Some("https://google.com")), "fb_ad_oct");
        assert_eq!(classify_source(None, None), DIRECT_SOURCE);
        assert_eq!(classify_source(Some("  "), Some("")), DIRECT_SOURCE);
        assert_eq!(
            classify_source(None, Some("https://m.facebook.com/story")),
            "Facebook (Organic)"
        );
        assert_eq!(classify_source(None, Some("https://l.instagram.com/")), "Instagram (Organic)");
        assert_eq!(classify_source(None, Some("https://www.google.com/")), "Google (Organic)");
        assert_eq!(classify_source(None, Some("https://youtube.com/watch")), "YouTube");
        assert_eq!(classify_source(None, Some("https://blog.example.org/post")), "blog.example.org");
        assert_eq!(classify_source(None, Some("not a url")), "External Website");
    }
}
