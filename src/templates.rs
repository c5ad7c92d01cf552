//! Template System - Structured Contract Skeleton
//!
//! A template is an ordered list of numbered sections. Every piece of text
//! may carry `{name}` placeholders which are filled by a single
//! substitution pass: substituted values are never re-scanned.

use std::collections::BTreeMap;

use tracing::warn;

/// Placeholder name to resolved value.
pub type Bindings = BTreeMap<&'static str, String>;

/// One numbered top-level section, rendered as `N) TITLE` followed by its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub number: u8,
    pub title: &'static str,
    pub body: &'static str,
}

impl Section {
    pub fn render(&self, bindings: &Bindings) -> String {
        format!("{}) {}\n{}", self.number, self.title, substitute(self.body, bindings))
    }
}

/// A fixed document shape: preamble, numbered sections, closing.
#[derive(Debug, Clone, Copy)]
pub struct ContractTemplate {
    pub id: &'static str,
    pub version: &'static str,
    pub preamble: &'static str,
    pub sections: &'static [Section],
    pub closing: &'static str,
}

impl ContractTemplate {
    /// Render every part and join them with one blank line.
    pub fn render(&self, bindings: &Bindings) -> String {
        let mut parts = Vec::with_capacity(self.sections.len() + 2);
        parts.push(substitute(self.preamble, bindings));
        parts.extend(self.sections.iter().map(|s| s.render(bindings)));
        parts.push(substitute(self.closing, bindings));
        parts.join("\n\n")
    }

    /// Placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Vec<&'static str> {
        let texts = std::iter::once(self.preamble)
            .chain(self.sections.iter().flat_map(|s| [s.title, s.body]))
            .chain(std::iter::once(self.closing));

        let mut names: Vec<&'static str> = vec![];
        for text in texts {
            for name in scan_placeholders(text) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

/// Replace `{name}` slots with their bound values.
///
/// A brace that does not open a well-formed slot is copied as-is. Unbound
/// slots are left verbatim.
pub fn substitute(template: &str, bindings: &Bindings) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match placeholder_name(after) {
            Some(name) => {
                match bindings.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        warn!(placeholder = name, "unbound template placeholder");
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn scan_placeholders(text: &'static str) -> Vec<&'static str> {
    let mut names = vec![];
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match placeholder_name(after) {
            Some(name) => {
                names.push(name);
                rest = &after[name.len() + 1..];
            }
            None => rest = after,
        }
    }
    names
}

fn placeholder_name(s: &str) -> Option<&str> {
    let end = s.find(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'))?;
    if end > 0 && s[end..].starts_with('}') {
        Some(&s[..end])
    } else {
        None
    }
}

/// Heading of the termination section.
pub const TERMINATION_TITLE: &str = "RESCISÃO, RENÚNCIA E ENCERRAMENTO";

/// The services contract (prestação de serviços advocatícios).
pub static CONTRACT_TEMPLATE: ContractTemplate = ContractTemplate {
    id: "contrato-servicos-advocaticios",
    version: "1.0.0",
    preamble: "CONTRATO DE PRESTAÇÃO DE SERVIÇOS ADVOCATÍCIOS (MODELO)\n\
        \n\
        PARTES\n\
        CONTRATANTE: {contratante}\n\
        CONTRATADO(A): {contratado} — {oab}",
    sections: &CONTRACT_SECTIONS,
    closing: "E, por estarem de acordo, as partes firmam o presente instrumento.\n\
        \n\
        Local e data: ______________________________\n\
        \n\
        CONTRATANTE: ______________________________\n\
        \n\
        CONTRATADO(A): ______________________________\n",
};

static CONTRACT_SECTIONS: [Section; 11] = [
    Section {
        number: 1,
        title: "OBJETO",
        body: "1.1. O presente contrato tem por objeto {objeto}\n\
            1.2. O serviço observa a legislação aplicável, o Código de Ética e Disciplina e a independência técnica do(a) CONTRATADO(A).",
    },
    Section {
        number: 2,
        title: "ESCOPO, LIMITES E ATOS INCLUÍDOS",
        body: "2.1. Inclui-se, em regra, conforme a natureza do serviço:\n\
            (a) reunião/consulta inicial e definição de estratégia;\n\
            (b) análise de documentos fornecidos;\n\
            (c) elaboração de peças e manifestações necessárias ao objeto;\n\
            (d) acompanhamento do andamento e comunicação de eventos relevantes.\n\
            2.2. NÃO estão incluídos, salvo ajuste escrito específico:\n\
            (a) propositura de novas demandas não previstas no objeto;\n\
            (b) recursos em qualquer instância/tribunal;\n\
            (c) sustentações orais, memoriais, despachos presenciais;\n\
            (d) diligências externas, viagens, audiências extras ou incidentes não previstos;\n\
            (e) perícias/assistência técnica especializada fora do escopo.\n\
            2.3. Caso surjam medidas não previstas, as partes poderão firmar aditivo com novo escopo e honorários.",
    },
    Section {
        number: 3,
        title: "DEVERES DO(A) CONTRATANTE",
        body: "3.1. Fornecer informações verdadeiras, completas e documentos necessários, respondendo por omissões que possam comprometer a atuação.\n\
            3.2. Manter canais de contato atualizados e atender solicitações em prazo compatível com urgências e prazos.\n\
            3.3. Realizar pagamentos pactuados e reembolsar despesas, conforme previsto.",
    },
    Section {
        number: 4,
        title: "HONORÁRIOS",
        body: "4.1. As partes ajustam: {honorarios}\n\
            4.2. Honorários podem ser fixos, por fase/etapa ou por êxito (quando aplicável).\n\
            4.3. Honorários de êxito (se aplicáveis):\n\
            (a) incidem sobre o benefício econômico efetivamente obtido pelo(a) CONTRATANTE;\n\
            (b) são devidos em acordo, sentença, recebimento administrativo, compensação ou forma equivalente;\n\
            (c) se houver acordo sem participação do(a) CONTRATADO(A), poderão ser devidos conforme atuação já realizada, conforme pactuação.\n\
            4.4. Honorários de sucumbência:\n\
            (a) quando fixados em favor do(a) advogado(a), pertencem ao(à) CONTRATADO(A), sem prejuízo dos honorários contratuais, salvo ajuste expresso em contrário.\n\
            4.5. Atraso e inadimplência:\n\
            (a) a falta de pagamento autoriza suspensão de atos não urgentes, com comunicação ao(à) CONTRATANTE;\n\
            (b) cobranças devem observar urbanidade e discrição, sem exposição.",
    },
    Section {
        number: 5,
        title: "DESPESAS, CUSTAS E REEMBOLSO",
        body: "5.1. {despesas}\n\
            5.2. Despesas incluem: custas, emolumentos, diligências, cópias, autenticações, deslocamentos, correspondentes e taxas.\n\
            5.3. Sempre que possível, o(a) CONTRATADO(A) informará previamente despesas relevantes. Em urgência, poderão ser realizadas para evitar prejuízo, com posterior prestação de contas.",
    },
    Section {
        number: 6,
        title: "COMUNICAÇÃO E ATUALIZAÇÕES",
        body: "6.1. Canal preferencial: {comunicacao}\n\
            6.2. O(a) CONTRATADO(A) comunicará eventos relevantes e necessidades de documentos.\n\
            6.3. Mensagens são voltadas à logística e atualizações; análises extensas serão priorizadas em reunião/consulta.",
    },
    Section {
        number: 7,
        title: "CONFIDENCIALIDADE E PROTEÇÃO DE DADOS",
        body: "7.1. As partes se comprometem a manter sigilo sobre informações e documentos relacionados ao caso.\n\
            7.2. Dados e documentos serão tratados estritamente para execução do contrato e cumprimento de deveres profissionais/legais.\n\
            7.3. Adotam-se medidas razoáveis de segurança (controle de acesso, armazenamento adequado e descarte seguro).",
    },
    Section {
        number: 8,
        title: "INDEPENDÊNCIA TÉCNICA",
        body: "8.1. O(a) CONTRATADO(A) atuará com independência técnica, não se comprometendo com resultado específico.",
    },
    Section {
        number: 9,
        title: "PRAZO",
        body: "9.1. Vigência a partir da assinatura até a conclusão do objeto, rescisão ou encerramento.",
    },
    Section {
        number: 10,
        title: TERMINATION_TITLE,
        body: "{clausulas_rescisao}",
    },
    Section {
        number: 11,
        title: "FORO",
        body: "11.1. Fica eleito o foro da {foro}, com renúncia a qualquer outro, para dirimir controvérsias decorrentes deste contrato.",
    },
];
