//! Indicadores de producción para coordinación y gerencia.

use campo_domain::{Case, RiskClass};
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskStatusCount {
    pub risk: String,
    pub status: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectorProductivity {
    pub inspector: String,
    pub total: usize,
    pub concluded: usize,
    pub in_progress: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Indicators {
    pub total: usize,
    pub concluded: usize,
    pub in_progress: usize,
    /// Tasa de conclusión ya formateada (`"66.7%"`, `"0%"` sin datos).
    pub completion_rate: String,
    pub by_risk_status: Vec<RiskStatusCount>,
    pub productivity: Vec<InspectorProductivity>,
}

// Alto, Médio, Baixo primero; otros valores después, en orden de aparición.
fn risk_rank(risk: &str) -> usize {
    RiskClass::ALL.iter()
                  .position(|r| r.as_str() == risk.trim())
                  .unwrap_or(RiskClass::ALL.len())
}

pub fn indicators(cases: &[Case]) -> Indicators {
    let total = cases.len();
    let concluded = cases.iter().filter(|c| c.status.is_concluded()).count();
    let in_progress = cases.iter().filter(|c| c.status.is_in_progress()).count();
    let completion_rate = if total > 0 {
        format!("{:.1}%", concluded as f64 / total as f64 * 100.0)
    } else {
        "0%".to_string()
    };

    let mut groups: IndexMap<(String, String), usize> = IndexMap::new();
    for c in cases {
        *groups.entry((c.risk.trim().to_string(), c.status.to_string())).or_insert(0) += 1;
    }
    let mut by_risk_status: Vec<RiskStatusCount> =
        groups.into_iter()
              .map(|((risk, status), count)| RiskStatusCount { risk, status, count })
              .collect();
    by_risk_status.sort_by_key(|g| risk_rank(&g.risk));

    let mut per_inspector: IndexMap<&str, (usize, usize)> = IndexMap::new();
    for c in cases {
        let slot = per_inspector.entry(c.owner_id.as_str()).or_insert((0, 0));
        slot.0 += 1;
        if c.status.is_concluded() {
            slot.1 += 1;
        }
    }
    let productivity = per_inspector.into_iter()
                                    .map(|(inspector, (total, concluded))| InspectorProductivity {
                                        inspector: inspector.to_string(),
                                        total,
                                        concluded,
                                        in_progress: total - concluded,
                                    })
                                    .collect();

    Indicators { total,
                 concluded,
                 in_progress,
                 completion_rate,
                 by_risk_status,
                 productivity }
}
