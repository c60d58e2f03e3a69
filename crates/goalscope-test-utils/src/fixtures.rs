// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A small corpus covering the shapes real exports take.
//!
//! | # | Goal                        | Owner      | Department       | Health   |
//! |---|-----------------------------|------------|------------------|----------|
//! | 0 | Platform reliability program| Sarah Chen | Engineering      | On Track |
//! | 1 | Billing system migration    | Tom Reyes  | Engineering      | At Risk  |
//! | 2 | Expand enterprise pipeline  | Priya Nair | Sales            | Behind   |
//! | 3 | Reduce customer churn       | Lee Park   | Customer Success | Exceeded |
//! | 4 | Office relocation           | (none)     | (none)           | nan      |
//!
//! Goal 1 has a milestone that is behind while the goal itself is only at
//! risk. Goal 3 has four milestones, one untitled. Every goal carries a
//! 4-dimensional embedding along one axis (goal 4 shares goal 0's axis).

use goalscope_core::{GoalId, GoalRecord, Kpi, Milestone};

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn milestone(title: Option<&str>, owner: &str, health: &str) -> Milestone {
    Milestone {
        title: title.map(str::to_string),
        owner: text(owner),
        health: text(health),
        ..Default::default()
    }
}

fn axis(i: usize) -> Vec<f32> {
    let mut v = vec![0.0; 4];
    v[i % 4] = 1.0;
    v
}

pub fn sample_corpus() -> Vec<GoalRecord> {
    vec![
        GoalRecord {
            id: GoalId("G-100".into()),
            title: text("Platform reliability program"),
            description: text("Raise availability of customer-facing services"),
            owner: text("Sarah Chen"),
            department: text("Engineering"),
            health: text("On Track"),
            last_update: text("SLO coverage reached 80% of services"),
            end_date: text("2026-12-31"),
            milestones: vec![
                milestone(Some("SLO dashboards"), "Sarah Chen", "On Track"),
                milestone(Some("Incident review cadence"), "Tom Reyes", "Achieved"),
            ],
            kpis: vec![Kpi {
                title: text("Uptime"),
                description: text("Monthly availability"),
                health: text("On Track"),
            }],
            embedding: axis(0),
        },
        GoalRecord {
            id: GoalId("G-101".into()),
            title: text("Billing system migration"),
            description: text("Move invoicing off the legacy billing stack"),
            owner: text("Tom Reyes"),
            department: text("Engineering"),
            health: text("At Risk"),
            last_update: text("Vendor contract signed; data mapping slipping"),
            end_date: text("2026-09-30"),
            milestones: vec![
                milestone(Some("Data cutover"), "Ana Silva", "Behind"),
                milestone(Some("Legacy shutdown"), "Tom Reyes", "Not Started"),
            ],
            kpis: Vec::new(),
            embedding: axis(1),
        },
        GoalRecord {
            id: GoalId("G-102".into()),
            title: text("Expand enterprise pipeline"),
            description: text("Grow qualified enterprise opportunities"),
            owner: text("Priya Nair"),
            department: text("Sales"),
            health: text("Behind"),
            last_update: text("Two regions below target"),
            end_date: text("2026-06-30"),
            milestones: vec![milestone(Some("Hire regional leads"), "Priya Nair", "At Risk")],
            kpis: vec![Kpi {
                title: text("Qualified pipeline"),
                description: None,
                health: text("Behind"),
            }],
            embedding: axis(2),
        },
        GoalRecord {
            id: GoalId("G-103".into()),
            title: text("Reduce customer churn"),
            description: text("Cut logo churn through proactive outreach"),
            owner: text("Lee Park"),
            department: text("Customer Success"),
            health: text("Exceeded"),
            last_update: None,
            end_date: text("2026-03-31"),
            milestones: vec![
                milestone(Some("Health scoring model"), "Lee Park", "Achieved"),
                milestone(None, "Lee Park", "On Track"),
                milestone(Some("Quarterly business reviews"), "Lee Park", "On Track"),
                milestone(Some("Renewal playbook"), "Ana Silva", "Exceeded"),
            ],
            kpis: Vec::new(),
            embedding: axis(3),
        },
        GoalRecord {
            id: GoalId(String::new()),
            title: text("Office relocation"),
            description: None,
            owner: None,
            department: None,
            health: text("nan"),
            last_update: None,
            end_date: None,
            milestones: Vec::new(),
            kpis: Vec::new(),
            embedding: axis(0),
        },
    ]
}
