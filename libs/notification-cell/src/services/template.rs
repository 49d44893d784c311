use crate::models::ConfirmationEmail;

pub(crate) const SHOP_NAME: &str = "Distrito Barbearia";

pub fn subject(email: &ConfirmationEmail) -> String {
    format!("Confirmação de Agendamento - {}", email.confirmation_code)
}

/// `YYYY-MM-DD` → `DD/MM/YYYY`; anything else is shown as given.
pub fn format_date(date: &str) -> String {
    let parts: Vec<&str> = date.split('-').collect();
    match parts.as_slice() {
        [year, month, day] => format!("{}/{}/{}", day, month, year),
        _ => date.to_string(),
    }
}

fn payment_label(payment_method: &str) -> &'static str {
    if payment_method == "later" {
        "Pagar no local"
    } else {
        "Pago antecipadamente"
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn render_html(email: &ConfirmationEmail) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
        .header {{ background-color: #1a1a1a; color: white; padding: 20px; text-align: center; }}
        .content {{ padding: 20px; background-color: #f9f9f9; }}
        .details {{ background-color: white; padding: 15px; margin: 10px 0; border-left: 4px solid #1a1a1a; }}
        .confirmation-code {{ font-size: 24px; font-weight: bold; color: #1a1a1a; text-align: center; padding: 10px; }}
        .footer {{ text-align: center; padding: 20px; color: #666; font-size: 12px; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header"><h1>{shop}</h1></div>
        <div class="content">
            <h2>Olá, {name}!</h2>
            <p>Seu agendamento foi confirmado com sucesso.</p>
            <div class="details">
                <h3>Detalhes do Agendamento</h3>
                <p><strong>Barbeiro:</strong> {barber}</p>
                <p><strong>Especialidade:</strong> {specialty}</p>
                <p><strong>Serviço:</strong> {service}</p>
                <p><strong>Preço:</strong> R$ {price:.2}</p>
                <p><strong>Duração:</strong> {duration} minutos</p>
                <p><strong>Data:</strong> {date}</p>
                <p><strong>Horário:</strong> {time}</p>
                <p><strong>Forma de Pagamento:</strong> {payment}</p>
            </div>
            <div class="confirmation-code">Código de Confirmação: {code}</div>
            <p>Por favor, apresente este código quando chegar na barbearia.</p>
            <p>Se precisar alterar ou cancelar seu agendamento, entre em contato conosco pelo WhatsApp: {whatsapp}</p>
        </div>
        <div class="footer"><p>{shop} - Agradecemos sua preferência!</p></div>
    </div>
</body>
</html>
"#,
        shop = SHOP_NAME,
        name = escape_html(&email.customer_name),
        barber = escape_html(&email.barber.name),
        specialty = escape_html(&email.barber.specialty),
        service = escape_html(&email.service.name),
        price = email.service.price,
        duration = email.service.duration,
        date = format_date(&email.date),
        time = escape_html(&email.time),
        payment = payment_label(&email.payment_method),
        code = escape_html(&email.confirmation_code),
        whatsapp = escape_html(&email.customer_whatsapp),
    )
}

pub fn render_text(email: &ConfirmationEmail) -> String {
    format!(
        "Olá, {name}!

Seu agendamento foi confirmado com sucesso.

DETALHES DO AGENDAMENTO:
- Barbeiro: {barber}
- Especialidade: {specialty}
- Serviço: {service}
- Preço: R$ {price:.2}
- Duração: {duration} minutos
- Data: {date}
- Horário: {time}
- Forma de Pagamento: {payment}

CÓDIGO DE CONFIRMAÇÃO: {code}

Por favor, apresente este código quando chegar na barbearia.
Se precisar alterar ou cancelar seu agendamento, entre em contato conosco pelo WhatsApp: {whatsapp}

{shop} - Agradecemos sua preferência!
",
        name = email.customer_name,
        barber = email.barber.name,
        specialty = email.barber.specialty,
        service = email.service.name,
        price = email.service.price,
        duration = email.service.duration,
        date = format_date(&email.date),
        time = email.time,
        payment = payment_label(&email.payment_method),
        code = email.confirmation_code,
        whatsapp = email.customer_whatsapp,
        shop = SHOP_NAME,
    )
}
