use crate::analysis::{ComponentScores, TradeMetrics};

const MAX_ITEMS: usize = 4;

/// Derive up to four strengths and four weaknesses from fixed thresholds.
/// Per dimension the bands are disjoint, so the same dimension can never
/// appear on both lists.
pub fn strengths_weaknesses(
    scores: &ComponentScores,
    metrics: &TradeMetrics,
) -> (Vec<String>, Vec<String>) {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();

    if scores.consistency >= 70 {
        strengths.push("Highly consistent trading patterns".to_string());
    } else if scores.consistency < 50 {
        weaknesses.push("Inconsistent performance over time".to_string());
    }

    if scores.risk >= 70 {
        strengths.push("Excellent risk management".to_string());
    } else if scores.risk < 50 {
        weaknesses.push("Poor risk management practices".to_string());
    }

    if scores.accuracy >= 70 {
        strengths.push("Strong prediction accuracy".to_string());
    } else if scores.accuracy < 50 {
        weaknesses.push("Below-average win rate".to_string());
    }

    if scores.volatility <= 30 {
        strengths.push("Low return volatility".to_string());
    } else if scores.volatility > 60 {
        weaknesses.push("High return volatility".to_string());
    }

    if scores.discipline >= 70 {
        strengths.push("Disciplined entry and exit execution".to_string());
    } else if scores.discipline < 50 {
        weaknesses.push("Lacks trading discipline".to_string());
    }

    if metrics.win_rate >= 55.0 {
        strengths.push(format!("Above-average win rate ({}%)", metrics.win_rate));
    }
    if metrics.avg_roi > 15.0 {
        strengths.push("Strong average ROI per trade".to_string());
    }
    if metrics.max_drawdown < 20.0 {
        strengths.push("Controlled maximum drawdown".to_string());
    }

    if metrics.max_drawdown > 35.0 {
        weaknesses.push(format!(
            "High maximum drawdown ({}%)",
            metrics.max_drawdown
        ));
    }
    if metrics.win_rate < 45.0 {
        weaknesses.push("Win rate below market average".to_string());
    }

    strengths.truncate(MAX_ITEMS);
    weaknesses.truncate(MAX_ITEMS);
    (strengths, weaknesses)
}

fn tier(follow_score: u8) -> &'static str {
    match follow_score {
        75..=100 => "excellent",
        60..=74 => "above-average",
        45..=59 => "moderate",
        _ => "below-average",
    }
}

/// Templated one-paragraph summary. Pure function of already-computed values.
pub fn summary(follow_score: u8, metrics: &TradeMetrics, strengths: &[String]) -> String {
    let main_strength = strengths
        .first()
        .map_or_else(|| "trading activity".to_string(), |s| s.to_lowercase());
    let returns = if metrics.avg_roi > 0.0 {
        "positive"
    } else {
        "negative"
    };
    let exposure = if metrics.max_drawdown < 25.0 {
        "controlled"
    } else {
        "elevated"
    };

    format!(
        "This trader demonstrates {} performance with a Follow Score of {}. \
         Across {} analyzed trades over {} active trading days, the account shows \
         a {}% win rate with {} average returns. Key observation: {}. \
         Maximum drawdown of {}% indicates {} risk exposure.",
        tier(follow_score),
        follow_score,
        metrics.total_trades,
        metrics.active_days,
        metrics.win_rate,
        returns,
        main_strength,
        metrics.max_drawdown,
        exposure,
    )
}
