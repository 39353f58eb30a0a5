use farelight_core::FlightRecord;

/// Fixed reply for an empty result set. A filter miss is a normal outcome,
/// never a technical error surfaced to the conversation.
pub const NO_RESULTS_MESSAGE: &str =
    "No flights found matching your criteria. Try adjusting your search parameters.";

/// Render the capped result set into the conversational summary payload.
pub fn render_results(matches: &[&FlightRecord]) -> String {
    if matches.is_empty() {
        return NO_RESULTS_MESSAGE.to_string();
    }
    let blocks: Vec<String> = matches.iter().map(|flight| render_block(flight)).collect();
    format!(
        "Found {} flight{}:\n\n{}",
        matches.len(),
        if matches.len() > 1 { "s" } else { "" },
        blocks.join("\n\n")
    )
}

fn render_block(flight: &FlightRecord) -> String {
    let mut block = format!(
        "✈️ **{} {}**\n\
         📍 {} → {}\n\
         🕐 {} - {} ({})\n\
         💰 ${} {}\n\
         🛫 {}\n\
         💺 {} Class\n\
         🎒 {} checked bag{} included",
        flight.airline,
        flight.flight_number,
        flight.departure.airport_code,
        flight.arrival.airport_code,
        format_clock(&flight.departure_time),
        format_clock(&flight.arrival_time),
        format_duration(flight.duration),
        flight.price.total,
        format_stops(flight.stops),
        flight.aircraft.type_name,
        flight.service_class.label(),
        flight.baggage.checked,
        if flight.baggage.checked > 1 { "s" } else { "" },
    );
    if !flight.amenities.is_empty() {
        block.push_str("\n✨ ");
        block.push_str(&flight.amenities.join(", "));
    }
    block.push_str("\n---");
    block
}

/// Local wall-clock time with the record's own zone offset. A stamp that
/// fails to parse renders verbatim; rendering never aborts a query.
fn format_clock(raw: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => format!("{} {}", ts.format("%I:%M %p"), ts.offset()),
        Err(_) => raw.to_string(),
    }
}

fn format_duration(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

fn format_stops(stops: u32) -> String {
    if stops == 0 {
        "Direct".to_string()
    } else {
        format!("{} stop{}", stops, if stops > 1 { "s" } else { "" })
    }
}
