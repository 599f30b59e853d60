//! The system prompt that teaches the model the thought/action/observation
//! protocol.

use std::fmt::Write;

use strum::IntoEnumIterator;

use crate::action::{ACTION_PREFIX, OBSERVATION_PREFIX};
use crate::tools::ToolKind;

const PREAMBLE: &str = "\
Você opera em um loop de PENSAMENTO, AÇÃO, PAUSA, OBSERVAÇÃO.
No final do loop, você produz uma RESPOSTA.

Use o PENSAMENTO para descrever suas reflexões sobre a pergunta que lhe foi feita.
Use a AÇÃO para executar uma das ações disponíveis para você - então retorne à PAUSA.
A OBSERVAÇÃO será o resultado da execução dessas ações.
Escreva no máximo uma linha de AÇÃO por resposta.

Suas ações disponíveis são:";

const GUIDANCE: &str = "Sempre procure informações no Wikipedia se tiver a oportunidade de fazê-lo.";

/// A worked example session shown to the model.
struct Example {
    question: &'static str,
    thought: &'static str,
    tool: ToolKind,
    argument: &'static str,
    observation: &'static str,
    answer: &'static str,
}

const EXAMPLES: &[Example] = &[
    Example {
        question: "Quanto custa um monitor?",
        thought: "Eu deveria verificar o custo de um monitor usando obter_custo.",
        tool: ToolKind::LookupCost,
        argument: "monitor",
        observation: "Um monitor custa R$ 799,00.",
        answer: "Um monitor custa R$ 799,00.",
    },
    Example {
        question: "Qual é a capital da França?",
        thought: "Eu deveria procurar a França no Wikipedia.",
        tool: ToolKind::Wikipedia,
        argument: "França",
        observation: "A França é um país. A capital é Paris.",
        answer: "A capital da França é Paris.",
    },
    Example {
        question: "Como está o tempo em São Paulo?",
        thought: "Eu deveria obter a temperatura na cidade de São Paulo usando obter_clima_atual.",
        tool: ToolKind::CurrentWeather,
        argument: "São Paulo",
        observation: "21°C",
        answer: "A temperatura atual em São Paulo é 21°C.",
    },
];

/// Render the system prompt for the full tool set.
pub fn system_prompt() -> String {
    let mut out = String::from(PREAMBLE);
    out.push_str("\n\n");

    for kind in ToolKind::iter() {
        let name = kind.action_name();
        // Writing to a String cannot fail.
        let _ = write!(
            out,
            "{name}:\nex.: {name}: {}\n{}\n\n",
            kind.example_argument(),
            kind.description()
        );
    }

    out.push_str(GUIDANCE);

    for (i, example) in EXAMPLES.iter().enumerate() {
        let _ = write!(
            out,
            "\n\n\nExemplo de sessão #{n}:\n\n\
             Pergunta: {question}\n\
             PENSAMENTO: {thought}\n\
             {ACTION_PREFIX}{tool}: {argument}\n\
             PAUSA\n\n\
             Você será chamado novamente com isto:\n\n\
             {OBSERVATION_PREFIX}{observation}\n\n\
             Você então gera a resposta:\n\n\
             RESPOSTA: {answer}",
            n = i + 1,
            question = example.question,
            thought = example.thought,
            tool = example.tool.action_name(),
            argument = example.argument,
            observation = example.observation,
            answer = example.answer,
        );
    }

    out
}
