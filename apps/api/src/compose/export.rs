use chrono::NaiveDate;

/// Download name for an exported resume: `resume_<name>_<YYYY-MM-DD>.pdf`.
///
/// Every run of whitespace in the name, leading and trailing runs included, becomes a
/// single underscore.
pub fn export_file_name(full_name: &str, date: NaiveDate) -> String {
    let mut name = String::with_capacity(full_name.len());
    let mut in_space = false;
    for c in full_name.chars() {
        if c.is_whitespace() {
            if !in_space {
                name.push('_');
            }
            in_space = true;
        } else {
            name.push(c);
            in_space = false;
        }
    }
    format!("resume_{name}_{}.pdf", date.format("%Y-%m-%d"))
}

/// `Content-Disposition` value that makes browsers save `file_name`.
pub fn attachment_disposition(file_name: &str) -> String {
    let quoted = file_name.replace('\\', "\\\\").replace('"', "\\\"");
    format!("attachment; filename=\"{quoted}\"")
}
