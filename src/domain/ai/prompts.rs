pub const DAILY_TIPS: &str = "4 dicas rápidas de saúde pet para hoje.";

/// Body Condition Score plus general health read of a photo.
pub const BODY_SCAN: &str = "Analise BCS e saúde desta foto.";

pub fn clinic_search(search: &str, address: &str) -> String {
    format!(
        "Liste 3 locais de {} próximos a {}. Retorne NOME|NOTA|AVAL|PROS|CONTRAS",
        search.trim(),
        address.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clinic_prompt_asks_for_pipe_format() {
        let prompt = clinic_search(" veterinário ", "Rua das Flores, 100");
        assert_eq!(
            prompt,
            "Liste 3 locais de veterinário próximos a Rua das Flores, 100. Retorne NOME|NOTA|AVAL|PROS|CONTRAS"
        );
    }
}
