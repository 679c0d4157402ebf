//! Display helpers: INR amounts, slugs, previews and inquiry messages.

/// Format rupees with Indian digit grouping, e.g. `₹1,25,000`.
///
/// The last three digits form one group; everything before is grouped in
/// pairs (lakh, crore).
pub fn format_inr(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let sign = if amount < 0 { "-" } else { "" };

    if digits.len() <= 3 {
        return format!("{sign}₹{digits}");
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{sign}₹{},{tail}", groups.join(","))
}

/// Lowercase ASCII slug with single dashes between words.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Prefilled WhatsApp text a student sends to the platform about a listing.
pub fn whatsapp_inquiry_message(
    pg_title: &str,
    area: &str,
    monthly_rent: i32,
    student_name: &str,
    message: Option<&str>,
) -> String {
    let mut text = format!(
        "Hi, I'm {student_name}. I'm interested in \"{pg_title}\" in {area} ({}/month).",
        format_inr(monthly_rent.into())
    );
    if let Some(message) = message.map(str::trim).filter(|m| !m.is_empty()) {
        text.push(' ');
        text.push_str(message);
    }
    text
}
