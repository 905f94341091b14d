//! Confirmation email rendering.
//!
//! The HTML body is a Handlebars template rendered in strict mode, so a
//! missing field fails the render instead of producing an empty link.
//! Values are HTML-escaped by the registry.

use chrono::{DateTime, Datelike, Locale, Utc};
use chrono_tz::Tz;
use handlebars::Handlebars;
use serde::Serialize;

use crate::error::MailError;

const CONFIRMATION_TEMPLATE_NAME: &str = "booking_confirmation";

/// Long Spanish date, e.g. "lunes, 5 de mayo de 2025 a las 11:00".
const MEETING_TIME_FORMAT: &str = "%A, %-d de %B de %Y a las %H:%M";

const CONFIRMATION_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="es">
<body style="margin:0;padding:0;background-color:#F3F4F6;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,Helvetica,Arial,sans-serif;color:#111827;">
  <div style="display:none;overflow:hidden;line-height:1px;opacity:0;max-height:0;max-width:0;">
    Tu cita ha sido confirmada. Detalles y enlaces dentro.
  </div>
  <table role="presentation" width="100%" cellpadding="0" cellspacing="0" style="background-color:#F3F4F6;padding:24px 0;">
    <tr>
      <td align="center">
        <table role="presentation" width="600" cellpadding="0" cellspacing="0" style="width:600px;max-width:90%;background-color:#FFFFFF;border-radius:12px;overflow:hidden;">
          <tr>
            <td style="background-color:#1570db;color:#FFFFFF;padding:20px 24px;text-align:left;">
              <div style="font-size:16px;opacity:0.9;">Confirmación de cita</div>
              <div style="font-size:28px;font-weight:700;margin-top:4px;">¡Hola, {{guest_name}}!</div>
            </td>
          </tr>
          <tr>
            <td style="padding:24px;">
              <p style="margin:0 0 12px;font-size:16px;">Tu cita ha sido confirmada. Aquí tienes los detalles:</p>
              <table role="presentation" width="100%" cellpadding="0" cellspacing="0" style="border:1px solid #E5E7EB;border-radius:10px;background-color:#FAFAFA;margin:12px 0 20px;">
                <tr>
                  <td style="padding:16px 18px;">
                    <div style="font-size:14px;color:#6B7280;margin-bottom:10px;">Fecha y hora</div>
                    <div style="font-size:16px;font-weight:600;">{{meeting_time}}</div>
                    <div style="height:1px;background-color:#E5E7EB;margin:16px 0;"></div>
                    <div style="font-size:14px;color:#6B7280;margin-bottom:8px;">Videollamada</div>
                    <a href="{{meet_link}}" target="_blank" rel="noopener noreferrer" style="display:inline-block;background-color:#2563EB;color:#FFFFFF;padding:12px 16px;border-radius:8px;text-decoration:none;font-weight:600;font-size:14px;">Unirse con Google Meet</a>
                  </td>
                </tr>
              </table>
              <p style="margin:0 0 10px;font-size:14px;color:#6B7280;">¿Necesitas hacer cambios?</p>
              <a href="{{cancellation_link}}" target="_blank" rel="noopener noreferrer" style="display:inline-block;padding:10px 14px;border:1px solid #D1D5DB;border-radius:8px;text-decoration:none;font-weight:600;font-size:14px;color:#111827;background-color:#FFFFFF;">Gestionar mi cita</a>
              <div style="height:20px;"></div>
              <p style="margin:0;font-size:14px;color:#6B7280;">Si no reconoces esta cita, ignora este correo o contáctanos.</p>
            </td>
          </tr>
          <tr>
            <td style="padding:16px 24px;background-color:#F9FAFB;border-top:1px solid #E5E7EB;font-size:12px;color:#6B7280;text-align:center;">
              © {{year}} {{brand_name}}. Todos los derechos reservados.
            </td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>
"#;

/// Booking facts the confirmation email is built from.
#[derive(Debug, Clone)]
pub struct ConfirmationContext {
    pub guest_name: String,
    pub organizer_name: String,
    pub start: DateTime<Utc>,
    pub meet_link: String,
    pub cancellation_link: String,
}

#[derive(Serialize)]
struct TemplateData<'a> {
    guest_name: &'a str,
    meeting_time: String,
    meet_link: &'a str,
    cancellation_link: &'a str,
    brand_name: &'a str,
    year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

/// Formats the meeting start in `tz` with Spanish day and month names.
pub fn format_meeting_time(start: DateTime<Utc>, tz: &Tz) -> String {
    start
        .with_timezone(tz)
        .format_localized(MEETING_TIME_FORMAT, Locale::es_ES)
        .to_string()
}

pub fn confirmation_subject(organizer_name: &str) -> String {
    format!("Cita confirmada: Llamada con {}", organizer_name)
}

pub struct ConfirmationRenderer {
    registry: Handlebars<'static>,
    brand_name: String,
    time_zone: Tz,
}

impl ConfirmationRenderer {
    pub fn new(brand_name: impl Into<String>, time_zone: Tz) -> Result<Self, MailError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_template_string(CONFIRMATION_TEMPLATE_NAME, CONFIRMATION_TEMPLATE)?;

        Ok(Self {
            registry,
            brand_name: brand_name.into(),
            time_zone,
        })
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    pub fn render(&self, ctx: &ConfirmationContext) -> Result<RenderedEmail, MailError> {
        let data = TemplateData {
            guest_name: &ctx.guest_name,
            meeting_time: format_meeting_time(ctx.start, &self.time_zone),
            meet_link: &ctx.meet_link,
            cancellation_link: &ctx.cancellation_link,
            brand_name: &self.brand_name,
            year: Utc::now().with_timezone(&self.time_zone).year(),
        };

        Ok(RenderedEmail {
            subject: confirmation_subject(&ctx.organizer_name),
            html: self.registry.render(CONFIRMATION_TEMPLATE_NAME, &data)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Madrid;

    fn context() -> ConfirmationContext {
        ConfirmationContext {
            guest_name: "Ana".to_string(),
            organizer_name: "Dr. Ada".to_string(),
            start: Utc.with_ymd_and_hms(2025, 5, 5, 9, 0, 0).unwrap(),
            meet_link: "https://meet.google.com/abc-defg-hij".to_string(),
            cancellation_link: "https://book.example.com/cancel/0f3a".to_string(),
        }
    }

    #[test]
    fn meeting_time_is_spanish_and_local() {
        let start = Utc.with_ymd_and_hms(2025, 5, 5, 9, 0, 0).unwrap();
        assert_eq!(
            format_meeting_time(start, &Madrid),
            "lunes, 5 de mayo de 2025 a las 11:00"
        );
    }

    #[test]
    fn subject_names_the_organizer() {
        assert_eq!(
            confirmation_subject("Dr. Ada"),
            "Cita confirmada: Llamada con Dr. Ada"
        );
    }

    #[test]
    fn render_includes_links_and_greeting() {
        let renderer = ConfirmationRenderer::new("MedDeFi", Madrid).unwrap();
        let email = renderer.render(&context()).unwrap();

        assert_eq!(email.subject, "Cita confirmada: Llamada con Dr. Ada");
        assert!(email.html.contains("¡Hola, Ana!"));
        assert!(email.html.contains("lunes, 5 de mayo de 2025 a las 11:00"));
        assert!(email.html.contains("https://meet.google.com/abc-defg-hij"));
        assert!(email.html.contains("https://book.example.com/cancel/0f3a"));
        assert!(email.html.contains("MedDeFi. Todos los derechos reservados."));
    }

    #[test]
    fn guest_name_is_escaped() {
        let renderer = ConfirmationRenderer::new("MedDeFi", Madrid).unwrap();
        let mut ctx = context();
        ctx.guest_name = "<script>alert(1)</script>".to_string();

        let email = renderer.render(&ctx).unwrap();

        assert!(!email.html.contains("<script>"));
        assert!(email.html.contains("&lt;script&gt;"));
    }
}
