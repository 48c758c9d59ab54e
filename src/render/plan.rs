//! Render instructions derived from a chart snapshot

use super::surface::{AxisRange, LineStyle, MarkerStyle, PlottingSurface, Rgb};
use crate::limits::ControlLimitModel;
use crate::signals::{SignalPoint, SignalRegistry};
use serde::{Deserialize, Serialize};

/// Half-height of the visible y-range, in sigmas around the first center value
pub const Y_RANGE_SIGMAS: f64 = 3.5;

/// The eight lines of an individuals chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineRole {
    Monitored,
    Center,
    UpperAction,
    LowerAction,
    UpperWarning,
    LowerWarning,
    PlusOneSd,
    MinusOneSd,
}

impl LineRole {
    /// Drawing order; later lines are drawn on top
    pub const ALL: [LineRole; 8] = [
        LineRole::Monitored,
        LineRole::Center,
        LineRole::UpperAction,
        LineRole::LowerAction,
        LineRole::UpperWarning,
        LineRole::LowerWarning,
        LineRole::PlusOneSd,
        LineRole::MinusOneSd,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LineRole::Monitored => "monitored",
            LineRole::Center => "center",
            LineRole::UpperAction => "upper action limit",
            LineRole::LowerAction => "lower action limit",
            LineRole::UpperWarning => "upper warning limit",
            LineRole::LowerWarning => "lower warning limit",
            LineRole::PlusOneSd => "+1 sd",
            LineRole::MinusOneSd => "-1 sd",
        }
    }

    pub fn style(&self) -> LineStyle {
        match self {
            LineRole::Monitored => LineStyle::solid(Rgb::BLUE),
            LineRole::Center => LineStyle::solid(Rgb::BLACK),
            LineRole::UpperAction | LineRole::LowerAction => LineStyle::solid(Rgb::RED),
            LineRole::UpperWarning | LineRole::LowerWarning => LineStyle::solid(Rgb::DARK_ORANGE),
            LineRole::PlusOneSd | LineRole::MinusOneSd => LineStyle::solid(Rgb::GREEN),
        }
    }

    /// Sigma multiplier of a limit line; `None` for the monitored values
    pub fn sigma_multiplier(&self) -> Option<f64> {
        match self {
            LineRole::Monitored => None,
            LineRole::Center => Some(0.0),
            LineRole::UpperAction => Some(3.0),
            LineRole::LowerAction => Some(-3.0),
            LineRole::UpperWarning => Some(2.0),
            LineRole::LowerWarning => Some(-2.0),
            LineRole::PlusOneSd => Some(1.0),
            LineRole::MinusOneSd => Some(-1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedLine {
    pub role: LineRole,
    pub values: Vec<f64>,
}

/// Everything a surface needs to draw one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPlan {
    pub title: String,
    pub lines: Vec<PlannedLine>,
    pub markers: Vec<SignalPoint>,
    pub marker_style: MarkerStyle,
    pub range: AxisRange,
}

impl RenderPlan {
    pub fn build(title: &str, model: &ControlLimitModel, registry: &SignalRegistry) -> Self {
        let lines = LineRole::ALL
            .iter()
            .map(|role| PlannedLine {
                role: *role,
                values: match role.sigma_multiplier() {
                    Some(k) => model.band(k),
                    None => model.series().to_vec(),
                },
            })
            .collect();

        Self {
            title: title.to_string(),
            lines,
            markers: registry.points_above_threshold(),
            marker_style: MarkerStyle::default(),
            range: axis_range(model),
        }
    }

    pub fn line(&self, role: LineRole) -> Option<&PlannedLine> {
        self.lines.iter().find(|line| line.role == role)
    }

    /// Replay the plan onto a surface
    pub fn apply<S: PlottingSurface + ?Sized>(&self, surface: &mut S) {
        for line in &self.lines {
            surface.add_line(line.role.label(), &line.values, &line.role.style());
        }
        surface.add_markers(&self.markers, &self.marker_style);
        surface.set_visible_range(&self.range);
    }
}

/// x spans `[0, N]`; y is anchored on the first center value.
///
/// For a non-constant center the later points can fall outside this window.
pub fn axis_range(model: &ControlLimitModel) -> AxisRange {
    let anchor = model.center_line()[0];
    let half_height = Y_RANGE_SIGMAS * model.std_deviation();

    AxisRange {
        x_min: 0.0,
        x_max: model.len() as f64,
        y_min: anchor - half_height,
        y_max: anchor + half_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::MonitoredSeries;
    use crate::signals::SignalSequence;

    fn plan_for(values: Vec<f64>, center: f64, sigma: f64, codes: Vec<i64>) -> RenderPlan {
        let series = MonitoredSeries::new(values).unwrap();
        let model = ControlLimitModel::new(series.clone(), center, sigma).unwrap();
        let registry = SignalRegistry::new(series, SignalSequence::from(codes)).unwrap();
        RenderPlan::build("test", &model, &registry)
    }

    #[test]
    fn test_plan_has_eight_lines_in_order() {
        let plan = plan_for(vec![5.0; 5], 5.0, 1.0, vec![0; 5]);

        let roles: Vec<LineRole> = plan.lines.iter().map(|l| l.role).collect();
        assert_eq!(roles, LineRole::ALL.to_vec());
        assert_eq!(plan.line(LineRole::UpperAction).unwrap().values, vec![8.0; 5]);
        assert_eq!(plan.line(LineRole::LowerWarning).unwrap().values, vec![3.0; 5]);
        assert!(plan.markers.is_empty());
    }

    #[test]
    fn test_axis_range() {
        let plan = plan_for(vec![10.0, 12.0, 9.0, 20.0], 12.0, 2.0, vec![0, 0, 0, 5]);

        assert_eq!(
            plan.range,
            AxisRange {
                x_min: 0.0,
                x_max: 4.0,
                y_min: 5.0,
                y_max: 19.0,
            }
        );
        assert_eq!(plan.markers, vec![SignalPoint { index: 4, value: 20.0 }]);
    }

    #[test]
    fn test_color_convention() {
        assert_eq!(LineRole::Monitored.style().color, Rgb::BLUE);
        assert_eq!(LineRole::Center.style().color, Rgb::BLACK);
        assert_eq!(LineRole::LowerAction.style().color, Rgb::RED);
        assert_eq!(LineRole::UpperWarning.style().color, Rgb::DARK_ORANGE);
        assert_eq!(LineRole::MinusOneSd.style().color, Rgb::GREEN);
        assert_eq!(MarkerStyle::default().color, Rgb::RED);
    }
}
