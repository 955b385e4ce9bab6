/// Bilingual confirmation copy for the 9th Poisson d'Avril edition.
/// Locale "fr" gets French; anything else falls back to English.

pub fn confirmation_subject(locale: &str) -> &'static str {
    if locale == "fr" {
        "Confirmation d'inscription au Poisson d'Avril 9ème édition"
    } else {
        "Registration Confirmation - Poisson d'Avril 9th Edition"
    }
}

pub fn confirmation_html(
    first_name: &str,
    last_name: &str,
    partner_name: Option<&str>,
    locale: &str,
) -> String {
    let french = locale == "fr";

    let title = if french {
        "Confirmation d'inscription"
    } else {
        "Registration Confirmation"
    };

    let greeting = if french { "Cher(e)" } else { "Dear" };

    let body = if french {
        "Nous avons le plaisir de vous confirmer que votre inscription au \
         <span class='highlight'>9ème Trophée International de Surfcasting \
         Poisson d'Avril</span> a été enregistrée avec succès."
    } else {
        "We are pleased to confirm that your registration for the \
         <span class='highlight'>9th Poisson d'Avril International Surfcasting \
         Trophy</span> has been successfully recorded."
    };

    let details_heading = if french {
        "Détails de l'événement"
    } else {
        "Event Details"
    };

    let event_date = if french {
        "30 Avril & 01 & 02 Mai 2026"
    } else {
        "30 April & 01 & 02 May 2026"
    };

    let location = if french {
        "Hammamet-Sud, Bouficha, Tunisie"
    } else {
        "Hammamet-Sud, Bouficha, Tunisia"
    };

    let price_label = if french { "Tarif" } else { "Price" };

    let partner_block = partner_name
        .map(|name| {
            let heading = if french {
                "Votre partenaire"
            } else {
                "Your Partner"
            };
            format!(
                "<div class=\"info-box\"><h3>{heading}</h3><p><strong>{name}</strong></p></div>"
            )
        })
        .unwrap_or_default();

    let tickets = if french {
        "Les tickets seront disponibles chez nos points de vente publiés sur notre page Facebook."
    } else {
        "Tickets will be available at our points of sale published on our Facebook page."
    };

    let contact = if french {
        "Pour toute question, n'hésitez pas à nous contacter via WhatsApp :"
    } else {
        "For any questions, feel free to contact us via WhatsApp:"
    };

    let signoff = if french { "À très bientôt !" } else { "See you soon!" };

    let team = if french {
        "L'équipe CPSS"
    } else {
        "The CPSS Team"
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>
    body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #1a2744; }}
    .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
    .header {{ background-color: #1a2744; color: white; padding: 20px; text-align: center; border-radius: 10px 10px 0 0; }}
    .content {{ background-color: #f5f5f5; padding: 30px; border-radius: 0 0 10px 10px; }}
    .highlight {{ color: #c92536; font-weight: bold; }}
    .footer {{ text-align: center; margin-top: 20px; font-size: 12px; color: #666; }}
    .info-box {{ background-color: white; padding: 15px; border-radius: 8px; margin: 15px 0; }}
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>{title}</h1>
      <h2>Poisson d'Avril - 9ème Édition</h2>
    </div>
    <div class="content">
      <p>{greeting} <strong>{first_name} {last_name}</strong>,</p>
      <p>{body}</p>
      <div class="info-box">
        <h3>{details_heading}</h3>
        <p>📅 <strong>Date:</strong> {event_date}</p>
        <p>📍 <strong>Location:</strong> {location}</p>
        <p>💰 <strong>{price_label}:</strong> 450DT / 140€</p>
      </div>
      {partner_block}
      <p>{tickets}</p>
      <p>{contact}</p>
      <p>📱 Bouch: +216 97 475 628<br>📱 Walid: +216 54 157 440</p>
      <p>{signoff}</p>
      <p><strong>{team}</strong></p>
    </div>
    <div class="footer">
      <p>© 2026 CPSS - Club de Pêche Sportive de Sfax</p>
      <p>contact@cpss-poissondavril.com</p>
    </div>
  </div>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_follows_locale() {
        assert!(confirmation_subject("fr").contains("Confirmation d'inscription"));
        assert!(confirmation_subject("en").contains("Registration Confirmation"));
        // Any non-French locale falls back to English.
        assert!(confirmation_subject("de").contains("Registration Confirmation"));
    }

    #[test]
    fn french_body_addresses_the_athlete() {
        let html = confirmation_html("Amine", "Ben Salah", None, "fr");
        assert!(html.contains("Cher(e) <strong>Amine Ben Salah</strong>"));
        assert!(html.contains("9ème Trophée International"));
        assert!(!html.contains("Votre partenaire"));
    }

    #[test]
    fn english_body_includes_partner_block_for_pairs() {
        let html = confirmation_html("Marie", "Dupont", Some("Jean Martin"), "en");
        assert!(html.contains("Dear <strong>Marie Dupont</strong>"));
        assert!(html.contains("Your Partner"));
        assert!(html.contains("Jean Martin"));
    }
}
