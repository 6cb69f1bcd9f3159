use crate::models::FormField;
use crate::services::SessionCoordinator;

pub fn show(session: &SessionCoordinator) -> String {
    let form = session.form();
    let mut lines = vec!["📝 Pending transfer".to_string()];

    for field in FormField::ALL {
        let value = form.get(field);
        lines.push(format!(
            "{:<10} {}",
            field.as_str(),
            if value.is_empty() { "-" } else { value }
        ));
    }

    lines.join("\n")
}

/// `$set <field> <value...>`, the value may contain spaces
pub fn set(session: &SessionCoordinator, args: &[&str]) -> Result<String, String> {
    if args.is_empty() {
        return Err("Usage: $set <addressTo|amount|keyword|message> <value>".to_string());
    }

    let field: FormField = args[0].parse()?;
    let value = args[1..].join(" ");

    session.update_form_field(field, value.clone());
    Ok(format!("{} = {}", field, value))
}

pub fn clear(session: &SessionCoordinator) -> String {
    session.clear_form();
    "Form cleared".to_string()
}
