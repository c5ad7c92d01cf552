//! Guidance Book - quick questions, canned answers and official links.
//!
//! Answers are looked up by exact question text (after trimming). Unknown
//! questions get a generic answer.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// A suggested question and its topic tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickQuestion {
    pub text: &'static str,
    pub tag: &'static str,
}

/// A canned answer, rendered to HTML on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub title: &'static str,
    pub bullets: &'static [&'static str],
    /// Whether to show the ethics disclaimer box.
    pub delicate: bool,
}

/// An official OAB reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OfficialLink {
    pub key: &'static str,
    pub url: &'static str,
}

pub const OFFICIAL_LINKS: [OfficialLink; 3] = [
    OfficialLink {
        key: "codigo_etica_oab_pdf",
        url: "https://www.oab.org.br/content/pdf/legislacaoOab/codigodeetica.pdf",
    },
    OfficialLink {
        key: "provimento_205_2021",
        url: "https://www.oab.org.br/leisnormas/legislacao/provimentos/205-2021",
    },
    OfficialLink {
        key: "estatuto_oab_8906",
        url: "https://www.planalto.gov.br/ccivil_03/leis/l8906.htm",
    },
];

const fn q(text: &'static str, tag: &'static str) -> QuickQuestion {
    QuickQuestion { text, tag }
}

pub const QUICK_QUESTIONS: [QuickQuestion; 31] = [
    // Publicidade / marketing digital
    q("Posso impulsionar post no Instagram?", "Publicidade"),
    q("Posso divulgar valores e promoções?", "Publicidade"),
    q("Posso prometer resultado ou usar 'garantia'?", "Publicidade"),
    q("Posso postar fotos com clientes ou processos?", "Publicidade"),
    q("Posso anunciar 'especialista'?", "Publicidade"),
    q("Posso responder caixinha de perguntas com caso real?", "Publicidade"),
    q("Posso fazer sorteio de brindes ou serviços?", "Publicidade"),
    q("Posso usar Google Ads (Links Patrocinados)?", "Publicidade"),
    q("Posso enviar e-mail marketing ou mala direta?", "Publicidade"),
    q("Posso usar logotipos de Tribunais no meu cartão?", "Publicidade"),
    // Sigilo / dados / LGPD
    q("Posso falar do caso com familiares do cliente?", "Sigilo"),
    q("Posso confirmar que a pessoa é minha cliente?", "Sigilo"),
    q("Como lidar com documentos sensíveis e LGPD?", "LGPD"),
    q("Posso gravar reunião com cliente?", "LGPD"),
    // Honorários / financeiro
    q("Preciso de contrato de honorários por escrito?", "Honorários"),
    q("Posso cobrar consulta? Como formalizar?", "Honorários"),
    q("Como combinar êxito (quota litis) sem abusos?", "Honorários"),
    q("O que fazer com inadimplência sem expor o cliente?", "Honorários"),
    q("Posso reter documentos por falta de pagamento?", "Honorários"),
    q("Posso cobrar abaixo da tabela da OAB?", "Honorários"),
    q("Posso aceitar bens como pagamento?", "Honorários"),
    // Conflito / ética / sociedade
    q("Posso atuar contra ex-cliente?", "Conflito"),
    q("Posso representar duas partes relacionadas?", "Conflito"),
    q("Quando devo recusar patrocínio?", "Ética"),
    q("Posso substabelecer sem avisar?", "Ética"),
    q("Posso ter sociedade com contador ou médico?", "Sociedade"),
    q("Advogado pode ser preposto do cliente?", "Ética"),
    // Prerrogativas / atuação
    q("Posso falar mal de outro advogado publicamente?", "Postura"),
    q("Como agir em audiência com urbanidade?", "Postura"),
    q("Posso atuar sem procuração em urgência?", "Prerrogativa"),
    q("O que fazer se o cliente 'sumir'?", "Gestão"),
];

const fn a(title: &'static str, bullets: &'static [&'static str]) -> Answer {
    Answer { title, bullets, delicate: true }
}

pub const FALLBACK_ANSWER: Answer = a(
    "Guia ético (resposta geral)",
    &[
        "Essa dúvida depende do contexto e da normativa aplicável.",
        "Use a regra do ‘mínimo necessário’, moderação na comunicação e proteção de confidencialidade.",
        "Quando houver risco ético, consulte o TED/OAB e a normativa aplicável.",
    ],
);

static ANSWERS: [(&str, Answer); 21] = [
    (
        "Posso impulsionar post no Instagram?",
        a(
            "Pode, com cuidado (Provimento 205/2021).",
            &[
                "Em geral, é permitido impulsionar conteúdo informativo, sem oferta direta de serviços.",
                "Evite promessas, comparações, autopromoção agressiva e captação indevida.",
                "Priorize conteúdo educativo (direitos, prazos, orientações gerais) sem chamadas do tipo ‘contrate agora’.",
                "Quando em dúvida, consulte o Provimento 205/2021 e orientações do TED da sua seccional.",
            ],
        ),
    ),
    (
        "Posso divulgar valores e promoções?",
        a(
            "Regra prática: evite apelo comercial.",
            &[
                "“Promoção”, ‘desconto’, ‘pacote’ e linguagem mercantil tendem a ser problemáticos.",
                "Se precisar informar valores, prefira informar em contato privado e com sobriedade.",
                "Evite comparações (‘mais barato’, ‘melhor do que’).",
            ],
        ),
    ),
    (
        "Posso prometer resultado ou usar 'garantia'?",
        a(
            "Não é recomendado — risco ético alto.",
            &[
                "Promessa de resultado pode configurar publicidade irregular e ferir deveres de moderação.",
                "Use linguagem de meios, não de fins: explique etapas, riscos e variáveis do caso.",
                "Evite frases absolutas (‘ganho certo’, ‘causa ganha’).",
            ],
        ),
    ),
    (
        "Posso postar fotos com clientes ou processos?",
        a(
            "Só com extrema cautela — e em muitos casos é melhor evitar.",
            &[
                "Pode violar sigilo, privacidade e gerar captação indevida.",
                "Evite prints, nomes, números de processo, documentos, peças e decisões com elementos identificáveis.",
                "Prefira conteúdo genérico: ‘tese X’, ‘tema Y’, sem caso real.",
            ],
        ),
    ),
    (
        "Posso anunciar 'especialista'?",
        a(
            "Use apenas se houver titulação/critério compatível e comunicação sóbria.",
            &[
                "Evite títulos chamativos e qualificações vagas (‘o melhor’, ‘o mais renomado’).",
                "Prefira: área de atuação e formação real, sem induzir o público a erro.",
            ],
        ),
    ),
    (
        "Posso responder caixinha de perguntas com caso real?",
        a(
            "Evite. Transforme em exemplo abstrato.",
            &[
                "Mesmo sem nome, detalhes podem identificar a pessoa.",
                "Responda em tese: explique regras gerais, limites e caminhos típicos.",
                "Inclua aviso: não é consulta; caso concreto exige análise.",
            ],
        ),
    ),
    (
        "Posso fazer sorteio de brindes ou serviços?",
        a(
            "Não. É vedado expressamente.",
            &[
                "A advocacia não pode ser mercantilizada.",
                "Sorteios, brindes e oferta de serviços gratuitos para captar clientela tendem a ser infrações éticas.",
                "O foco deve ser conteúdo informativo e competência técnica.",
            ],
        ),
    ),
    (
        "Posso usar Google Ads (Links Patrocinados)?",
        a(
            "Em regra, é admitido com moderação (Provimento 205/2021).",
            &[
                "Mantenha caráter informativo e linguagem sóbria.",
                "Evite ‘consulta grátis’, ‘melhor preço’ e promessas.",
                "Atenção à captação indevida e mercantilização.",
            ],
        ),
    ),
    (
        "Posso enviar e-mail marketing ou mala direta?",
        a(
            "Somente com consentimento e para base própria.",
            &[
                "Evite disparos para listas desconhecidas (risco de spam/captação).",
                "Prefira boletins informativos para contatos que autorizaram.",
                "Inclua possibilidade de descadastro.",
            ],
        ),
    ),
    (
        "Posso usar logotipos de Tribunais no meu cartão?",
        a(
            "Não. Evite símbolos oficiais.",
            &[
                "Pode induzir a erro sobre vínculo com órgão público.",
                "Use apenas identidade visual própria.",
            ],
        ),
    ),
    (
        "Posso falar do caso com familiares do cliente?",
        a(
            "Não, sem autorização expressa e limites claros.",
            &[
                "A regra é confidencialidade.",
                "Se o cliente autorizar, delimite: quem, assunto e finalidade.",
                "Compartilhe o mínimo necessário.",
            ],
        ),
    ),
    (
        "Posso confirmar que a pessoa é minha cliente?",
        a(
            "Evite — o próprio vínculo pode ser sensível.",
            &[
                "Resposta padrão segura: ‘Não posso confirmar nem negar informações de atendimento/contratação’.",
                "Exceções devem ser justificadas e, quando possível, autorizadas por escrito.",
            ],
        ),
    ),
    (
        "Como lidar com documentos sensíveis e LGPD?",
        a(
            "Mínimo necessário + controle de acesso.",
            &[
                "Guarde só o necessário para o serviço.",
                "Senha forte, 2FA, backup e descarte seguro.",
                "Defina política de acesso e retenção.",
            ],
        ),
    ),
    (
        "Posso gravar reunião com cliente?",
        a(
            "Boa prática: só com consentimento e finalidade definida.",
            &[
                "Explique motivo e onde ficará armazenado.",
                "Evite gravação por padrão; prefira ata.",
                "Se o cliente não quiser, não grave.",
            ],
        ),
    ),
    (
        "Preciso de contrato de honorários por escrito?",
        a(
            "Altamente recomendado.",
            &[
                "Defina escopo, honorários, despesas, pagamentos e rescisão.",
                "Deixe claro o que é extra (recursos, diligências).",
                "Guarde assinado (inclusive eletrônico).",
            ],
        ),
    ),
    (
        "Posso cobrar consulta? Como formalizar?",
        a(
            "Pode — e registre por escrito.",
            &[
                "Informe valor e o que será entregue.",
                "Registre por WhatsApp/e-mail e formalize se virar patrocínio.",
                "Evite promessas de resultado.",
            ],
        ),
    ),
    (
        "Como combinar êxito (quota litis) sem abusos?",
        a(
            "Transparência e moderação.",
            &[
                "Explique base de cálculo e quando incide.",
                "Evite percentuais desproporcionais.",
                "Deixe claro custas e sucumbência.",
            ],
        ),
    ),
    (
        "O que fazer com inadimplência sem expor o cliente?",
        a(
            "Negocie e documente; sem exposição.",
            &[
                "Tente parcelar e ajustar datas.",
                "Formalize encerramento se necessário.",
                "Proteja prazos e entregue documentos essenciais.",
            ],
        ),
    ),
    (
        "Posso reter documentos por falta de pagamento?",
        a(
            "Evite — risco ético alto.",
            &[
                "Cobrança deve ser feita por meios próprios, sem coação.",
                "Em dúvida, consulte o TED/OAB.",
            ],
        ),
    ),
    (
        "Posso cobrar abaixo da tabela da OAB?",
        a(
            "Cuidado com aviltamento.",
            &[
                "Valores irrisórios podem caracterizar aviltamento e captação.",
                "Pro bono tem regras e não pode ser usado como publicidade.",
                "Mantenha dignidade e justificativa.",
            ],
        ),
    ),
    (
        "Posso aceitar bens como pagamento?",
        a(
            "Em regra, sim — com cautela.",
            &[
                "Registre no contrato e avalie compatibilidade do valor.",
                "Evite vulnerabilidade/lesão do cliente.",
            ],
        ),
    ),
];

static ANSWER_INDEX: Lazy<HashMap<&'static str, &'static Answer>> =
    Lazy::new(|| ANSWERS.iter().map(|(question, answer)| (*question, answer)).collect());

/// Exact-match lookup after trimming.
pub fn lookup(question: &str) -> Option<&'static Answer> {
    ANSWER_INDEX.get(question.trim()).copied()
}

/// HTML answer for `question`, falling back to the generic guide.
pub fn answer_for(question: &str) -> String {
    lookup(question).unwrap_or(&FALLBACK_ANSWER).to_html()
}

/// Escapes `&`, `<` and `>`.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl Answer {
    pub fn to_html(&self) -> String {
        let warning = if self.delicate {
            r#"
        <div class="alert-box warning">
          <strong>Nota ética:</strong> isto é um guia informacional. Em caso concreto, consulte o TED/OAB e a normativa aplicável.
        </div>
        "#
        } else {
            ""
        };
        let items: String = self
            .bullets
            .iter()
            .filter(|b| !b.trim().is_empty())
            .map(|b| format!("<li>{}</li>", escape_html(b)))
            .collect();

        format!(
            r#"
    <div class="resposta-humanizada">
      <h3>{}</h3>
      {}
      <ul>{}</ul>
    </div>
    "#,
            escape_html(self.title),
            warning,
            items
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_answer_has_a_quick_question() {
        for (question, _) in ANSWERS.iter() {
            assert!(
                QUICK_QUESTIONS.iter().any(|q| q.text == *question),
                "orphan answer {question:?}"
            );
        }
    }

    #[test]
    fn test_lookup_trims_question() {
        let answer = lookup("  Posso gravar reunião com cliente?\n").unwrap();
        assert_eq!(answer.title, "Boa prática: só com consentimento e finalidade definida.");
    }

    #[test]
    fn test_unknown_question_gets_fallback() {
        assert!(lookup("Posso atuar contra ex-cliente?").is_none());
        let html = answer_for("Posso atuar contra ex-cliente?");
        assert!(html.contains("Guia ético (resposta geral)"));
        assert!(html.contains("Nota ética:"));
    }

    #[test]
    fn test_html_escapes_and_skips_blank_bullets() {
        let answer = Answer {
            title: "A < B & C",
            bullets: &["<script>", "  ", "ok"],
            delicate: false,
        };
        let html = answer.to_html();
        assert!(html.contains("<h3>A &lt; B &amp; C</h3>"));
        assert!(html.contains("<ul><li>&lt;script&gt;</li><li>ok</li></ul>"));
        assert!(!html.contains("alert-box"));
    }

    #[test]
    fn test_quick_questions_are_unique() {
        for (i, question) in QUICK_QUESTIONS.iter().enumerate() {
            assert!(!QUICK_QUESTIONS[i + 1..].iter().any(|q| q.text == question.text));
        }
    }
}
