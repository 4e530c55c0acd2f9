//! Deterministic rules engine for productivity triage.
//!
//! Answers every request when no remote backend is configured, and serves as
//! the fallback when the remote backend fails. Matching is case-normalized
//! substring containment against small curated keyword sets, evaluated in a
//! fixed priority order:
//! - social/courtesy content → Improdutivo
//! - promotional content → Improdutivo
//! - support/request signals → Produtivo, reply picked by a nested priority
//! - anything else → Produtivo with a generic acknowledgment
//!
//! The ordering is a contract: a message that is both social and promotional
//! is resolved by the social branch.

use crate::classify::types::{Category, Classification};

/// Social/courtesy keywords — greetings, thanks, congratulations.
const SOCIAL_KEYWORDS: &[&str] = &[
    "feliz",
    "obrigado",
    "parabéns",
    "bom dia",
    "boa tarde",
    "boa noite",
    "felicit",
];

/// Promotional keywords — offers, discounts, purchase prompts.
const PROMO_KEYWORDS: &[&str] = &["promoção", "oferta", "compre", "desconto"];

/// Broad support/request keywords — anything that needs team action.
const SUPPORT_KEYWORDS: &[&str] = &[
    "status",
    "andamento",
    "pedido",
    "protocolo",
    "preciso",
    "ajuda",
    "suporte",
    "erro",
    "reclama",
    "cancelar",
    "comprovante",
    "anexo",
];

/// Status-inquiry subset of the support keywords (highest reply priority).
const STATUS_KEYWORDS: &[&str] = &["status", "andamento", "pedido", "protocolo"];

/// Document/attachment subset. The literal ".pdf" only selects the reply
/// here — it is not part of the broad support set.
const DOCUMENT_KEYWORDS: &[&str] = &["comprovante", "anexo", ".pdf"];

const REPLY_SOCIAL: &str = "Olá! Agradecemos sua mensagem. Atenciosamente, Equipe.";
const REPLY_PROMO: &str = "Mensagem identificada como promocional. Obrigado pelo contato.";
const REPLY_STATUS: &str =
    "Olá! Recebemos sua solicitação sobre status. Retornaremos em até 2 dias úteis.";
const REPLY_DOCUMENT: &str =
    "Olá! Confirmamos o recebimento do documento e faremos a validação.";
const REPLY_CANCEL: &str =
    "Olá! Recebemos a solicitação de cancelamento. Encaminharemos para análise.";
const REPLY_COMPLAINT: &str =
    "Olá! Sentimos pelo ocorrido. Encaminhamos a reclamação ao setor responsável.";
const REPLY_FORWARDED: &str =
    "Olá! Sua mensagem foi encaminhada para análise. Retornaremos em breve.";
const REPLY_DEFAULT: &str =
    "Olá! Sua mensagem foi recebida e será avaliada pela equipe.";

/// Classify a text blob.
///
/// Total over any string input: never errors, always returns a category and
/// a non-empty reply. Pure — same input, same output.
pub fn classify(text: &str) -> Classification {
    let t = text.to_lowercase();

    if contains_any(&t, SOCIAL_KEYWORDS) {
        return Classification::new(Category::Unproductive, REPLY_SOCIAL);
    }

    if contains_any(&t, PROMO_KEYWORDS) {
        return Classification::new(Category::Unproductive, REPLY_PROMO);
    }

    if contains_any(&t, SUPPORT_KEYWORDS) {
        let reply = if contains_any(&t, STATUS_KEYWORDS) {
            REPLY_STATUS
        } else if contains_any(&t, DOCUMENT_KEYWORDS) {
            REPLY_DOCUMENT
        } else if t.contains("cancelar") {
            REPLY_CANCEL
        } else if t.contains("reclam") || t.contains("erro") {
            REPLY_COMPLAINT
        } else {
            REPLY_FORWARDED
        };
        return Classification::new(Category::Productive, reply);
    }

    Classification::new(Category::Productive, REPLY_DEFAULT)
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn social_greeting_is_unproductive() {
        let result = classify("Bom dia, equipe!");
        assert_eq!(result.category, Category::Unproductive);
        assert_eq!(result.reply, REPLY_SOCIAL);
    }

    #[test]
    fn thanks_is_unproductive() {
        let result = classify("Muito obrigado pela atenção");
        assert_eq!(result.category, Category::Unproductive);
        assert_eq!(result.reply, REPLY_SOCIAL);
    }

    #[test]
    fn congratulations_scenario() {
        let result = classify("Parabéns pelo excelente atendimento!");
        assert_eq!(result.category, Category::Unproductive);
        assert_eq!(result.category.as_str(), "Improdutivo");
    }

    #[test]
    fn promotional_is_unproductive() {
        let result = classify("Aproveite nossa oferta com 50% de desconto");
        assert_eq!(result.category, Category::Unproductive);
        assert_eq!(result.reply, REPLY_PROMO);
    }

    #[test]
    fn social_wins_over_promotional() {
        // Priority contract: social branch is checked first.
        let result = classify("Bom dia! Aproveite nossa promoção especial.");
        assert_eq!(result.category, Category::Unproductive);
        assert_eq!(result.reply, REPLY_SOCIAL);
    }

    #[test]
    fn status_inquiry_scenario() {
        let result = classify("Qual o status do meu pedido #123?");
        assert_eq!(result.category, Category::Productive);
        assert_eq!(result.reply, REPLY_STATUS);
        assert!(result.reply.contains("2 dias úteis"));
    }

    #[test]
    fn protocol_number_gets_status_reply() {
        let result = classify("Gostaria de saber o andamento do protocolo 456");
        assert_eq!(result.category, Category::Productive);
        assert_eq!(result.reply, REPLY_STATUS);
    }

    #[test]
    fn attachment_gets_document_reply() {
        let result = classify("Segue o comprovante de pagamento em anexo");
        assert_eq!(result.category, Category::Productive);
        assert_eq!(result.reply, REPLY_DOCUMENT);
    }

    #[test]
    fn status_outranks_document_reply() {
        // Both subsets match; the nested priority picks status first.
        let result = classify("Segue o comprovante, qual o status?");
        assert_eq!(result.reply, REPLY_STATUS);
    }

    #[test]
    fn cancellation_without_higher_priority_keywords() {
        let result = classify("Quero cancelar minha assinatura");
        assert_eq!(result.category, Category::Productive);
        assert_eq!(result.reply, REPLY_CANCEL);
    }

    #[test]
    fn complaint_gets_complaint_reply() {
        let result = classify("Venho fazer uma reclamação sobre o serviço");
        assert_eq!(result.category, Category::Productive);
        assert_eq!(result.reply, REPLY_COMPLAINT);
    }

    #[test]
    fn error_report_gets_complaint_reply() {
        let result = classify("O sistema apresentou um erro ao salvar");
        assert_eq!(result.category, Category::Productive);
        assert_eq!(result.reply, REPLY_COMPLAINT);
    }

    #[test]
    fn help_request_gets_forwarded_reply() {
        // "preciso"/"ajuda" enter the support branch but match none of the
        // specific subsets.
        let result = classify("Preciso de ajuda com minha conta");
        assert_eq!(result.category, Category::Productive);
        assert_eq!(result.reply, REPLY_FORWARDED);
    }

    #[test]
    fn unmatched_text_defaults_to_productive() {
        let result = classify("Segue a planilha mensal para conferência");
        assert_eq!(result.category, Category::Productive);
        assert_eq!(result.reply, REPLY_DEFAULT);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let upper = classify("QUAL O STATUS DO PEDIDO?");
        let lower = classify("qual o status do pedido?");
        assert_eq!(upper, lower);
        assert_eq!(upper.reply, REPLY_STATUS);
    }

    #[test]
    fn matching_is_substring_not_word_boundary() {
        // "felicitações" matches via the "felicit" stem.
        let result = classify("Felicitações pela conquista");
        assert_eq!(result.category, Category::Unproductive);
    }

    #[test]
    fn pdf_mention_alone_does_not_enter_support_branch() {
        // ".pdf" only selects the document reply inside the support branch;
        // it is not a support keyword itself.
        let result = classify("arquivo.pdf");
        assert_eq!(result.reply, REPLY_DEFAULT);
    }

    #[test]
    fn never_errors_on_arbitrary_input() {
        for text in ["", " ", "\n\t", "émoji 🎉 ação", "1234567890", "<html></html>"] {
            let result = classify(text);
            assert!(!result.reply.is_empty());
        }
    }

    #[test]
    fn classify_is_idempotent() {
        let text = "Qual o andamento do pedido 99?";
        assert_eq!(classify(text), classify(text));
    }
}
