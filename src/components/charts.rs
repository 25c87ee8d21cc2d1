//! SVG renderings of the history aggregates: stacked bars per degree group,
//! a role pie for one group, and the you-vs-peers radar.

use std::f64::consts::PI;

use leptos::prelude::*;

use crate::insights::{PeerComparison, RoleCount, StackedSeries};

const PALETTE: [&str; 7] = [
    "#6366f1", "#f43f5e", "#10b981", "#f59e0b", "#8b5cf6", "#06b6d4", "#ef4444",
];

pub fn series_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Point at `fraction` of radius `r` along axis `index` of `axes`, with the
/// first axis pointing straight up.
pub fn polar(cx: f64, cy: f64, r: f64, index: usize, axes: usize, fraction: f64) -> (f64, f64) {
    let angle = -PI / 2.0 + 2.0 * PI * index as f64 / axes.max(1) as f64;
    (cx + r * fraction * angle.cos(), cy + r * fraction * angle.sin())
}

/// SVG path for a pie slice between two fractions of a full turn.
pub fn arc_path(cx: f64, cy: f64, r: f64, start: f64, end: f64) -> String {
    let (x0, y0) = polar(cx, cy, r, 0, 1, 1.0);
    let rotate = |(x, y): (f64, f64), turn: f64| {
        let a = 2.0 * PI * turn;
        let (dx, dy) = (x - cx, y - cy);
        (cx + dx * a.cos() - dy * a.sin(), cy + dx * a.sin() + dy * a.cos())
    };
    let (sx, sy) = rotate((x0, y0), start);
    let (ex, ey) = rotate((x0, y0), end);
    let large = if end - start > 0.5 { 1 } else { 0 };
    format!(
        "M {cx:.2} {cy:.2} L {sx:.2} {sy:.2} A {r:.2} {r:.2} 0 {large} 1 {ex:.2} {ey:.2} Z"
    )
}

/// `points` attribute for a radar polygon of 0..=100 scores.
pub fn radar_points(cx: f64, cy: f64, r: f64, scores: &[u32]) -> String {
    scores
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let (x, y) = polar(cx, cy, r, i, scores.len(), *s as f64 / 100.0);
            format!("{:.2},{:.2}", x, y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn legend(labels: Vec<String>) -> impl IntoView {
    view! {
        <ul class="chart-legend">
            {labels
                .into_iter()
                .enumerate()
                .map(|(i, label)| {
                    view! {
                        <li>
                            <span class="legend-swatch" style={format!("background:{}", series_color(i))}></span>
                            {label}
                        </li>
                    }
                })
                .collect::<Vec<_>>()}
        </ul>
    }
}

const BAR_W: f64 = 520.0;
const BAR_H: f64 = 260.0;
const BAR_LEFT: f64 = 36.0;
const BAR_BOTTOM: f64 = 40.0;
const BAR_TOP: f64 = 12.0;

#[component]
pub fn StackedBarChart(#[prop(into)] series: Signal<StackedSeries>) -> impl IntoView {
    move || {
        let series = series.get();
        if series.is_empty() {
            return view! { <p class="chart-empty">"No data to chart."</p> }.into_any();
        }

        let plot_h = BAR_H - BAR_BOTTOM - BAR_TOP;
        let max = series.max_total().max(1) as f64;
        let band = (BAR_W - BAR_LEFT) / series.groups.len() as f64;
        let bar_w = band * 0.6;

        let bars = series
            .groups
            .iter()
            .enumerate()
            .map(|(gi, group)| {
                let x = BAR_LEFT + gi as f64 * band + (band - bar_w) / 2.0;
                let mut base = BAR_H - BAR_BOTTOM;
                let segments = group
                    .counts
                    .iter()
                    .enumerate()
                    .filter(|(_, count)| **count > 0)
                    .map(|(ri, count)| {
                        let h = *count as f64 / max * plot_h;
                        base -= h;
                        let tip = format!("{}: {}", series.roles[ri], count);
                        view! {
                            <rect x=x y=base width=bar_w height=h fill={series_color(ri)}>
                                <title>{tip}</title>
                            </rect>
                        }
                    })
                    .collect::<Vec<_>>();
                view! {
                    <g>
                        {segments}
                        <text x={x + bar_w / 2.0} y={BAR_H - BAR_BOTTOM + 16.0} text-anchor="middle" class="chart-axis-label">
                            {group.group.clone()}
                        </text>
                    </g>
                }
            })
            .collect::<Vec<_>>();

        view! {
            <div class="chart">
                <svg viewBox={format!("0 0 {} {}", BAR_W, BAR_H)} class="chart-svg">
                    <line x1=BAR_LEFT y1=BAR_TOP x2=BAR_LEFT y2={BAR_H - BAR_BOTTOM} class="chart-axis" />
                    <line x1=BAR_LEFT y1={BAR_H - BAR_BOTTOM} x2=BAR_W y2={BAR_H - BAR_BOTTOM} class="chart-axis" />
                    <text x={BAR_LEFT - 6.0} y={BAR_TOP + 4.0} text-anchor="end" class="chart-axis-label">
                        {series.max_total().to_string()}
                    </text>
                    {bars}
                </svg>
                {legend(series.roles.clone())}
            </div>
        }
        .into_any()
    }
}

#[component]
pub fn PieChart(#[prop(into)] slices: Signal<Vec<RoleCount>>) -> impl IntoView {
    const C: f64 = 110.0;
    const R: f64 = 100.0;

    move || {
        let slices = slices.get();
        let total: usize = slices.iter().map(|s| s.count).sum();
        if total == 0 {
            return view! { <p class="chart-empty">"No records for this group."</p> }.into_any();
        }

        let mut start = 0.0;
        let shapes = slices
            .iter()
            .enumerate()
            .map(|(i, slice)| {
                let share = slice.count as f64 / total as f64;
                let tip = format!("{}: {}", slice.role, slice.count);
                let shape = if slice.count == total {
                    view! { <circle cx=C cy=C r=R fill={series_color(i)}><title>{tip}</title></circle> }
                        .into_any()
                } else {
                    let d = arc_path(C, C, R, start, start + share);
                    view! { <path d=d fill={series_color(i)}><title>{tip}</title></path> }.into_any()
                };
                start += share;
                shape
            })
            .collect::<Vec<_>>();

        let labels = slices
            .iter()
            .map(|s| format!("{} ({})", s.role, s.count))
            .collect();

        view! {
            <div class="chart">
                <svg viewBox="0 0 220 220" class="chart-svg chart-pie">{shapes}</svg>
                {legend(labels)}
            </div>
        }
        .into_any()
    }
}

#[component]
pub fn RadarChart(
    #[prop(into)] comparison: Signal<Option<PeerComparison>>,
    #[prop(optional)] subject_label: Option<&'static str>,
) -> impl IntoView {
    const C: f64 = 130.0;
    const R: f64 = 100.0;
    let subject_label = subject_label.unwrap_or("You");

    move || {
        let Some(cmp) = comparison.get() else {
            return view! { <p class="chart-empty">"Not enough data for a comparison."</p> }.into_any();
        };

        let n = cmp.points.len();
        let rings = [0.25, 0.5, 0.75, 1.0]
            .iter()
            .map(|f| {
                let pts = radar_points(C, C, R, &vec![(f * 100.0) as u32; n]);
                view! { <polygon points=pts class="radar-grid" /> }
            })
            .collect::<Vec<_>>();
        let axes = cmp
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let (x, y) = polar(C, C, R, i, n, 1.0);
                let (lx, ly) = polar(C, C, R, i, n, 1.15);
                view! {
                    <line x1=C y1=C x2=x y2=y class="radar-grid" />
                    <text x=lx y=ly text-anchor="middle" class="chart-axis-label">{p.metric.label()}</text>
                }
            })
            .collect::<Vec<_>>();

        let subject: Vec<u32> = cmp.points.iter().map(|p| p.subject).collect();
        let peers: Vec<u32> = cmp.points.iter().map(|p| p.peers).collect();
        let peer_label = format!("Peers ({})", cmp.peer_count);

        view! {
            <div class="chart">
                <svg viewBox="0 0 260 270" class="chart-svg chart-radar">
                    {rings}
                    {axes}
                    <polygon points={radar_points(C, C, R, &peers)} fill={series_color(1)} fill-opacity="0.35" stroke={series_color(1)} />
                    <polygon points={radar_points(C, C, R, &subject)} fill={series_color(0)} fill-opacity="0.45" stroke={series_color(0)} />
                </svg>
                {legend(vec![subject_label.to_string(), peer_label])}
            </div>
        }
        .into_any()
    }
}
