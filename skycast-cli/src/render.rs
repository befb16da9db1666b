//! Text rendering of the current-conditions and 5-day views.

use std::io::{self, Write};

use chrono::TimeZone;
use skycast_core::{
    DailySummary, ForecastSample, LoadState, Precision, Session, ViewMode, format_celsius,
};

/// Render whatever the session has to show in its active view.
pub fn render<Tz: TimeZone>(
    out: &mut impl Write,
    session: &Session,
    precision: Precision,
    tz: &Tz,
) -> io::Result<()> {
    let Some(forecast) = session.displayed() else {
        return match session.forecast() {
            LoadState::Failed(reason) => writeln!(out, "Could not load weather data: {reason}"),
            _ => writeln!(out, "Loading weather data..."),
        };
    };

    let theme = session.theme_in(tz);

    match session.view_mode() {
        ViewMode::Current => {
            writeln!(out, "Current Weather [{theme}]")?;
            match forecast.current() {
                Some(sample) => render_current(out, &forecast.city.to_string(), sample, precision)?,
                None => writeln!(out, "No data for {} yet.", forecast.city)?,
            }
        }
        ViewMode::Forecast => {
            writeln!(out, "5-Day Forecast for {} [{theme}]", forecast.city.name)?;
            let days = session.daily_summaries_in(tz);
            if days.is_empty() {
                writeln!(out, "No data yet.")?;
            }
            for day in &days {
                render_day(out, day, precision)?;
            }
        }
    }

    if let Some(reason) = session.forecast().error() {
        writeln!(out, "(showing previous result; refresh failed: {reason})")?;
    }
    Ok(())
}

fn render_current(
    out: &mut impl Write,
    place: &str,
    sample: &ForecastSample,
    precision: Precision,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "  {}°C", format_celsius(sample.temperature, precision))?;
    writeln!(out, "  {place}")?;
    if let Some(condition) = &sample.condition {
        writeln!(out, "  {}", condition.description)?;
        writeln!(out, "  {}", condition.icon_url())?;
    }
    writeln!(out)?;
    writeln!(out, "  Feels like  {}°C", format_celsius(sample.feels_like, precision))?;
    writeln!(out, "  Humidity    {}%", sample.humidity_pct)?;
    writeln!(out, "  Wind        {} m/s", sample.wind_speed_mps)?;
    writeln!(out, "  Pressure    {:.0} hPa", sample.pressure_hpa)?;
    match sample.visibility_m {
        Some(m) => writeln!(out, "  Visibility  {} km", f64::from(m) / 1000.0)?,
        None => writeln!(out, "  Visibility  n/a")?,
    }
    writeln!(out, "  Clouds      {}%", sample.clouds_pct)
}

fn render_day(out: &mut impl Write, day: &DailySummary, precision: Precision) -> io::Result<()> {
    let rep = &day.representative;
    let description = rep
        .condition
        .as_ref()
        .map(|c| c.description.as_str())
        .unwrap_or("-");

    writeln!(
        out,
        "{:<12} {:>7}°C  H: {}° L: {}°  {:<20} humidity {}%  wind {} m/s",
        day.date.format("%a, %b %-d").to_string(),
        format_celsius(rep.temperature, precision),
        format_celsius(day.daily_max, precision),
        format_celsius(day.daily_min, precision),
        description,
        rep.humidity_pct,
        rep.wind_speed_mps,
    )
}
