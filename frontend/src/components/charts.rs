use leptos::*;

#[derive(Debug, Clone, PartialEq)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
}

/// Bar widths as percentages of the largest value. All-zero input yields all zeros.
pub fn bar_widths(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return vec![0.0; values.len()];
    }
    values
        .iter()
        .map(|value| (value.max(0.0) / max * 100.0).clamp(0.0, 100.0))
        .collect()
}

#[component]
pub fn BarChart(
    #[prop(into)] title: String,
    #[prop(into)] data: Signal<Vec<BarDatum>>,
    #[prop(optional, into)] unit: Option<String>,
) -> impl IntoView {
    let unit = unit.unwrap_or_default();
    let bars = move || {
        let data = data.get();
        let widths = bar_widths(&data.iter().map(|d| d.value).collect::<Vec<_>>());
        data.into_iter()
            .zip(widths)
            .map(|(datum, width)| {
                let value = if datum.value.fract() == 0.0 {
                    format!("{:.0}{}", datum.value, unit)
                } else {
                    format!("{:.1}{}", datum.value, unit)
                };
                view! {
                    <div class="flex items-center gap-3 text-sm">
                        <span class="w-28 truncate text-fg-muted">{datum.label}</span>
                        <div class="flex-1 bg-surface-muted rounded h-4">
                            <div
                                class="bg-action-primary-bg h-4 rounded"
                                style=format!("width: {:.1}%", width)
                            ></div>
                        </div>
                        <span class="w-16 text-right text-fg">{value}</span>
                    </div>
                }
            })
            .collect_view()
    };
    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-4">
            <h3 class="text-sm font-semibold text-fg mb-3">{title}</h3>
            <div class="space-y-2">{bars}</div>
        </div>
    }
}
