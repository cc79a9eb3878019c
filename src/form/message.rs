pub const DEFAULT_MESSAGE: &str = "Nenhuma mensagem adicional";

/// Values read off the contact form at submit time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

impl ContactRequest {
    fn message_or_default(&self) -> &str {
        if self.message.trim().is_empty() {
            DEFAULT_MESSAGE
        } else {
            &self.message
        }
    }

    /// WhatsApp-flavoured markdown: `*bold*` labels, one field per line.
    pub fn to_text(&self) -> String {
        format!(
            "*Nova mensagem do formulário - ConfortClean*\n\
             \n\
             *DADOS DO FORMULÁRIO:*\n\
             \n\
             👤 *Nome:* {}\n\
             📧 *E-mail:* {}\n\
             📱 *Telefone:* {}\n\
             🛋️ *Serviço Desejado:* {}\n\
             💬 *Mensagem:* {}\n\
             \n\
             ---\n\
             *Recebido via formulário do website*",
            self.name,
            self.email,
            self.phone,
            self.service,
            self.message_or_default()
        )
        .trim()
        .to_string()
    }

    pub fn whatsapp_link(&self, number: &str) -> String {
        whatsapp_link(number, &self.to_text())
    }
}

pub fn whatsapp_link(number: &str, text: &str) -> String {
    format!("https://wa.me/{}?text={}", number, urlencoding::encode(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> ContactRequest {
        ContactRequest {
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            phone: "(11) 9 8888-7777".to_string(),
            service: "Limpeza".to_string(),
            message: String::new(),
        }
    }

    #[test]
    fn blank_message_uses_default() {
        let text = ana().to_text();
        assert!(text.contains("💬 *Mensagem:* Nenhuma mensagem adicional"));
        assert!(text.contains("👤 *Nome:* Ana"));
        assert!(text.contains("📧 *E-mail:* ana@x.com"));
        assert!(text.contains("📱 *Telefone:* (11) 9 8888-7777"));
        assert!(text.contains("🛋️ *Serviço Desejado:* Limpeza"));
    }

    #[test]
    fn template_layout() {
        let text = ana().to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "*Nova mensagem do formulário - ConfortClean*");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "*DADOS DO FORMULÁRIO:*");
        assert_eq!(lines.last(), Some(&"*Recebido via formulário do website*"));
        assert_eq!(lines.len(), 12);
    }

    #[test]
    fn supplied_message_is_kept() {
        let request = ContactRequest { message: "Sofá de 3 lugares".to_string(), ..ana() };
        assert!(request.to_text().contains("💬 *Mensagem:* Sofá de 3 lugares"));
    }

    #[test]
    fn link_is_percent_encoded() {
        let url = ana().whatsapp_link("5581973019151");
        assert!(url.starts_with("https://wa.me/5581973019151?text="));
        let query = url.split_once("?text=").map(|(_, q)| q).unwrap_or_default();
        assert!(!query.contains(' '));
        assert!(!query.contains('\n'));
        assert!(query.contains("%0A"));
        let decoded = urlencoding::decode(query).unwrap();
        assert_eq!(decoded, ana().to_text());
    }
}
