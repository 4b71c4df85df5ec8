use chrono::{DateTime, Utc};
use skyview_core::{Session, UiState, WeatherView};

/// Text shown for a session, whatever state it is in.
pub fn render_session(session: &Session, show_raw: bool) -> String {
    match session.state() {
        UiState::Idle => "Enter a location to get the weather.\n".to_string(),
        UiState::Loading => "Loading...\n".to_string(),
        UiState::Error(message) => format!("Error: {message}\n"),
        UiState::Success(snapshot) => render_view(&WeatherView::from_snapshot(snapshot), show_raw),
    }
}

pub fn render_view(view: &WeatherView, show_raw: bool) -> String {
    let mut output = format!("{}\n", view.headline);
    output.push_str(&format!("  {}\n", view.condition));
    if let Some(icon) = &view.icon_url {
        output.push_str(&format!("  Icon: {icon}\n"));
    }
    output.push_str(&format!("  Temperature: {}\n", view.temperature));
    if let Some(feels_like) = &view.feels_like {
        output.push_str(&format!("  Feels like: {feels_like}\n"));
    }
    output.push_str(&format!("  Humidity: {}\n", view.humidity));
    if let Some(wind) = &view.wind {
        output.push_str(&format!("  Wind: {wind}\n"));
    }
    if let Some(observed_at) = view.observed_at {
        output.push_str(&format!("  Updated: {}\n", format_time(observed_at)));
    }

    let aq = &view.air_quality;
    output.push_str(&format!("  Air Quality Index: {}\n", aq.index_or_placeholder()));
    if aq.present {
        output.push_str(&format!("  PM2.5: {}\n", aq.pm2_5_or_placeholder()));
        output.push_str(&format!("  PM10: {}\n", aq.pm10_or_placeholder()));
    }
    output.push_str(&format!(
        "  Air quality data present: {}\n",
        if aq.present { "Yes" } else { "No" }
    ));
    if !aq.keys.is_empty() {
        output.push_str(&format!("  Keys: {}\n", aq.keys.join(", ")));
    }

    output.push_str(&format!("  Background: {} ({})\n", view.background_key, view.background_url));

    if show_raw {
        output.push_str("\nair_quality (raw):\n");
        output.push_str(&aq.raw);
        output.push('\n');
    }

    output
}

fn format_time(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}
