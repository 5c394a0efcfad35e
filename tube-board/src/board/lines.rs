//! Line colours.

/// Colour used for lines without an entry in the table.
pub const DEFAULT_LINE_COLOUR: &str = "#5f6b73";

/// Brand colour for a line, matched case-insensitively on the line name.
pub fn line_colour(line_name: &str) -> &'static str {
    match line_name.trim().to_lowercase().as_str() {
        "bakerloo" => "#b36305",
        "central" => "#e32017",
        "circle" => "#ffd300",
        "district" => "#00782a",
        "hammersmith & city" => "#f3a9bb",
        "jubilee" => "#a0a5a9",
        "metropolitan" => "#9b0056",
        "northern" => "#000000",
        "piccadilly" => "#003688",
        "victoria" => "#0098d4",
        "waterloo & city" => "#95cdba",
        "elizabeth line" | "elizabeth" => "#6950a1",
        "dlr" => "#00a4a7",
        "london overground" => "#ee7c0e",
        _ => DEFAULT_LINE_COLOUR,
    }
}
