use std::fmt::Display;

use crate::db::PropertyDetails;

pub const SYSTEM_INSTRUCTION: &str =
    "Você é um especialista em avaliação imobiliária. Forneça análises precisas e profissionais.";

const NOT_PROVIDED: &str = "Não informado";

fn or_not_provided<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_PROVIDED.to_string(), |v| v.to_string())
}

/// Renders the fixed appraisal request for one property.
pub fn build_prompt(property: &PropertyDetails) -> String {
    let description = property
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or("Não fornecida");

    format!(
        "Por favor, faça uma avaliação detalhada do seguinte imóvel:\n\
         \n\
         Endereço: {address}\n\
         Área: {area}m²\n\
         Quartos: {bedrooms}\n\
         Banheiros: {bathrooms}\n\
         Vagas de Garagem: {parking}\n\
         Descrição Adicional: {description}\n\
         \n\
         Forneça:\n\
         1. Uma estimativa de preço com faixa de valores (mínimo e máximo)\n\
         2. Análise dos pontos fortes do imóvel\n\
         3. Comparação com mercado local\n\
         4. Potencial de valorização\n\
         5. Recomendações para melhorar o valor do imóvel",
        address = property.address,
        area = property.area,
        bedrooms = or_not_provided(property.bedrooms),
        bathrooms = or_not_provided(property.bathrooms),
        parking = or_not_provided(property.parking_spots),
        description = description,
    )
}
