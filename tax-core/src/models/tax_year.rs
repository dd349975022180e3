/// Tax years the calculator accepts unless configured otherwise.
pub const SUPPORTED_YEARS: [i32; 4] = [2019, 2020, 2021, 2022];

/// Renders a year set the way rejection messages name it:
/// `2022`, `2021 or 2022`, `2019, 2020, 2021, or 2022`.
pub fn describe_years(years: &[i32]) -> String {
    let names: Vec<String> = years.iter().map(i32::to_string).collect();
    match names.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} or {second}"),
        [rest @ .., last] => format!("{}, or {last}", rest.join(", ")),
    }
}
