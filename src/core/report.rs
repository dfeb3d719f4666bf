use crate::core::rules::MAX_ACTIVITIES;
use crate::core::system::EnrollmentSystem;
use crate::domain::model::Profile;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct ActivityDemand {
    pub name: String,
    pub enrolled: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityAverageAge {
    pub name: String,
    pub average_age: f64,
}

/// Aggregate statistics derived from the final assignment state. Built once,
/// after the enrollment sweep; nothing here re-evaluates rules.
#[derive(Debug, Clone, Serialize)]
pub struct AdmissionReport {
    pub generated_at: DateTime<Utc>,
    pub counts_by_profile: BTreeMap<Profile, usize>,
    /// Sorted descending by enrollment count; ties keep catalog order.
    pub demand_by_activity: Vec<ActivityDemand>,
    /// Catalog order, mean roster age rounded to one decimal.
    pub average_age_by_activity: Vec<ActivityAverageAge>,
    /// None when nobody is registered (the rate would be 0/0).
    pub completion_rate: Option<String>,
    pub rejected_for_capacity: Vec<String>,
}

pub fn summarize(system: &EnrollmentSystem) -> AdmissionReport {
    let mut counts_by_profile: BTreeMap<Profile, usize> =
        Profile::ALL.iter().map(|&p| (p, 0)).collect();
    for participant in system.participants() {
        *counts_by_profile.entry(participant.profile).or_insert(0) += 1;
    }

    let mut demand_by_activity: Vec<ActivityDemand> = system
        .activities()
        .iter()
        .map(|a| ActivityDemand {
            name: a.name.clone(),
            enrolled: a.roster().len(),
        })
        .collect();
    // Stable sort keeps catalog order for equal counts.
    demand_by_activity.sort_by(|a, b| b.enrolled.cmp(&a.enrolled));

    let average_age_by_activity = system
        .activities()
        .iter()
        .map(|a| {
            let roster = a.roster();
            let average_age = if roster.is_empty() {
                0.0
            } else {
                let sum: u32 = roster.iter().map(|&pid| system.participant(pid).age).sum();
                round_one_decimal(f64::from(sum) / roster.len() as f64)
            };
            ActivityAverageAge {
                name: a.name.clone(),
                average_age,
            }
        })
        .collect();

    let total = system.participants().len();
    let completion_rate = if total == 0 {
        tracing::warn!("no registered participants, completion rate is undefined");
        None
    } else {
        let completed = system
            .participants()
            .iter()
            .filter(|p| p.enrolled_count() == MAX_ACTIVITIES)
            .count();
        Some(format!(
            "{:.1}%",
            completed as f64 * 100.0 / total as f64
        ))
    };

    AdmissionReport {
        generated_at: Utc::now(),
        counts_by_profile,
        demand_by_activity,
        average_age_by_activity,
        completion_rate,
        rejected_for_capacity: system.rejected_names(),
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl AdmissionReport {
    /// Flat (section, name, value) rows for the CSV export.
    pub fn csv_rows(&self) -> Vec<[String; 3]> {
        let mut rows = Vec::new();
        for (profile, count) in &self.counts_by_profile {
            rows.push([
                "profile_count".to_string(),
                profile.to_string(),
                count.to_string(),
            ]);
        }
        for demand in &self.demand_by_activity {
            rows.push([
                "activity_demand".to_string(),
                demand.name.clone(),
                demand.enrolled.to_string(),
            ]);
        }
        for avg in &self.average_age_by_activity {
            rows.push([
                "activity_average_age".to_string(),
                avg.name.clone(),
                format!("{:.1}", avg.average_age),
            ]);
        }
        rows.push([
            "completion_rate".to_string(),
            String::new(),
            self.completion_rate.clone().unwrap_or_else(|| "n/a".to_string()),
        ]);
        for name in &self.rejected_for_capacity {
            rows.push([
                "rejected_for_capacity".to_string(),
                name.clone(),
                String::new(),
            ]);
        }
        rows
    }
}

impl fmt::Display for AdmissionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Admission report ({})", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f, "Registered participants by profile:")?;
        for (profile, count) in &self.counts_by_profile {
            writeln!(f, "  {}: {}", profile, count)?;
        }
        writeln!(f, "Demand by activity:")?;
        for demand in &self.demand_by_activity {
            writeln!(f, "  {}: {} enrolled", demand.name, demand.enrolled)?;
        }
        writeln!(f, "Average age by activity:")?;
        for avg in &self.average_age_by_activity {
            writeln!(f, "  {}: {:.1}", avg.name, avg.average_age)?;
        }
        match &self.completion_rate {
            Some(rate) => writeln!(f, "Completion rate (3 activities): {}", rate)?,
            None => writeln!(f, "Completion rate (3 activities): n/a (no registered participants)")?,
        }
        if self.rejected_for_capacity.is_empty() {
            writeln!(f, "Turned away for capacity: none")?;
        } else {
            writeln!(
                f,
                "Turned away for capacity: {}",
                self.rejected_for_capacity.join(", ")
            )?;
        }
        Ok(())
    }
}
