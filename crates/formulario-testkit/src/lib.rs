// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use formulario_app::FormState;

const DOCUMENT_TITLES: [&str; 10] = [
    "Informe financiero trimestral",
    "Acta de la reunión directiva",
    "Propuesta de presupuesto anual",
    "Plan de mantenimiento preventivo",
    "Resumen de ventas regionales",
    "Contrato de arrendamiento comercial",
    "Manual de procedimientos internos",
    "Solicitud de soporte técnico",
    "Evaluación de desempeño semestral",
    "Estudio de mercado preliminar",
];

const BODY_WORDS: [&str; 24] = [
    "informe",
    "detalla",
    "ingresos",
    "gastos",
    "trimestre",
    "presupuesto",
    "proyecto",
    "cliente",
    "contrato",
    "servicio",
    "análisis",
    "resultados",
    "propuesta",
    "revisión",
    "categoría",
    "documento",
    "resumen",
    "objetivos",
    "equipo",
    "entrega",
    "operaciones",
    "costos",
    "balance",
    "inventario",
];

const FIRST_NAMES: [&str; 10] = [
    "Ana", "Luis", "Maria", "Jorge", "Lucia", "Carlos", "Elena", "Pablo", "Sofia", "Diego",
];
const LAST_NAMES: [&str; 8] = [
    "Garcia", "Perez", "Lopez", "Martinez", "Sanchez", "Torres", "Ramirez", "Flores",
];
const MAIL_DOMAINS: [&str; 4] = [
    "ejemplo.com",
    "correo.example.org",
    "mail.example.net",
    "documentos.example",
];

const MALFORMED_EMAILS: [&str; 6] = [
    "plainaddress",
    "falta-arroba.com",
    "ana@",
    "@ejemplo.com",
    "dos@@ejemplo.com",
    "con espacio@ejemplo.com",
];

const WELL_FORMED_EMAILS: [&str; 4] = [
    "ana@ejemplo.com",
    "luis.garcia@correo.example.org",
    "soporte@documentos.example",
    "a@b",
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Deterministic generator for realistic form input. Same seed, same
/// values, so tests can assert against what they filled in.
#[derive(Debug, Clone)]
pub struct FormFaker {
    rng: DeterministicRng,
}

impl FormFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    /// A title within the document form's 5..=100 character window.
    pub fn document_title(&mut self) -> String {
        self.pick(&DOCUMENT_TITLES).to_owned()
    }

    /// A body within the document form's 20..=1000 character window.
    pub fn document_body(&mut self) -> String {
        self.sentence(8, 20)
    }

    pub fn person_name(&mut self) -> String {
        format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
    }

    pub fn email(&mut self) -> String {
        format!(
            "{}.{}@{}",
            self.pick(&FIRST_NAMES).to_ascii_lowercase(),
            self.pick(&LAST_NAMES).to_ascii_lowercase(),
            self.pick(&MAIL_DOMAINS),
        )
    }

    pub fn phone_digits(&mut self) -> String {
        let mut digits = String::with_capacity(10);
        for _ in 0..10 {
            digits.push(char::from(b'0' + (self.rng.int_n(10) as u8)));
        }
        digits
    }

    pub fn message(&mut self) -> String {
        self.sentence(6, 25)
    }

    /// Fills a document-form state with values that pass validation.
    pub fn fill_document_form(&mut self, state: &mut FormState) {
        let title = self.document_title();
        let body = self.document_body();
        state.edit_text("titulo", &title);
        state.edit_text("texto", &body);
    }

    /// Fills a contact-form state with values that pass validation.
    pub fn fill_contact_form(&mut self, state: &mut FormState) {
        let name = self.person_name();
        let email = self.email();
        let phone = self.phone_digits();
        let message = self.message();
        state.edit_text("nombre", &name);
        state.edit_text("correo", &email);
        state.edit_text("telefono", &phone);
        state.edit_text("mensaje", &message);
        state.edit_flag("acepta_terminos", true);
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn sentence(&mut self, min_words: usize, max_words: usize) -> String {
        let span = max_words.saturating_sub(min_words) + 1;
        let count = min_words + self.rng.int_n(span);
        let mut parts = Vec::with_capacity(count);
        for _ in 0..count {
            parts.push(self.pick(&BODY_WORDS).to_owned());
        }
        let mut sentence = parts.join(" ");
        if let Some(first) = sentence.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        sentence.push('.');
        sentence
    }
}

pub fn malformed_emails() -> &'static [&'static str] {
    &MALFORMED_EMAILS
}

pub fn well_formed_emails() -> &'static [&'static str] {
    &WELL_FORMED_EMAILS
}

#[cfg(test)]
mod tests {
    use super::{FormFaker, malformed_emails, well_formed_emails};
    use formulario_app::{FormDefinition, FormState};
    use std::collections::BTreeSet;

    #[test]
    fn same_seed_generates_same_values() {
        let mut left = FormFaker::new(42);
        let mut right = FormFaker::new(42);

        assert_eq!(left.document_title(), right.document_title());
        assert_eq!(left.email(), right.email());
        assert_eq!(left.phone_digits(), right.phone_digits());
    }

    #[test]
    fn filled_document_form_passes_validation() {
        for seed in 0_u64..20_u64 {
            let mut faker = FormFaker::new(seed);
            let mut state = FormState::new(FormDefinition::document());
            faker.fill_document_form(&mut state);

            let errors = state.definition().validate(state.values());
            assert!(errors.is_empty(), "seed {seed}");
        }
    }

    #[test]
    fn filled_contact_form_passes_validation() {
        for seed in 0_u64..20_u64 {
            let mut faker = FormFaker::new(seed);
            let mut state = FormState::new(FormDefinition::contact());
            faker.fill_contact_form(&mut state);

            let errors = state.definition().validate(state.values());
            assert!(errors.is_empty(), "seed {seed}");
        }
    }

    #[test]
    fn generated_bodies_stay_within_the_schema_window() {
        let mut faker = FormFaker::new(7);
        for _ in 0..50 {
            let body = faker.document_body();
            let length = body.chars().count();
            assert!((20..=1000).contains(&length), "length {length}");
        }
    }

    #[test]
    fn phone_digits_are_digits_only() {
        let mut faker = FormFaker::new(3);
        for _ in 0..20 {
            let phone = faker.phone_digits();
            assert_eq!(phone.len(), 10);
            assert!(phone.chars().all(|ch| ch.is_ascii_digit()));
        }
    }

    #[test]
    fn email_fixture_lists_disagree_with_each_other() {
        let malformed: BTreeSet<&str> = malformed_emails().iter().copied().collect();
        for email in well_formed_emails() {
            assert!(!malformed.contains(email), "email {email}");
        }
    }

    #[test]
    fn email_fixtures_match_the_contact_form_rules() {
        let definition = FormDefinition::contact();
        let mut faker = FormFaker::new(9);
        let mut state = FormState::new(definition);
        faker.fill_contact_form(&mut state);

        for email in well_formed_emails() {
            state.edit_text("correo", email);
            let errors = state.definition().validate(state.values());
            assert!(errors.message_for("correo").is_none(), "email {email}");
        }
        for email in malformed_emails() {
            state.edit_text("correo", email);
            let errors = state.definition().validate(state.values());
            assert!(errors.message_for("correo").is_some(), "email {email}");
        }
    }

    #[test]
    fn variety_across_seeds() {
        let mut titles = BTreeSet::new();
        for seed in 0_u64..20_u64 {
            let mut faker = FormFaker::new(seed);
            titles.insert(faker.document_title());
        }
        assert!(titles.len() >= 5, "got {}", titles.len());
    }
}
