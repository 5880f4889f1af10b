//! Hardcoded site copy.
//!
//! The `*_block` functions return fully populated field sets used as the
//! fallback for every block. [`default_sections`] is the collection seeded
//! into storage on first load.

use super::fields::{
    ContactFields, ContactInfoItem, Faq, Feature, FooterFields, FooterLinks, HeaderFields,
    HeroFields, HowItWorksFields, Link, Partner, PartnersFields, SectionFields, ServicesFields,
    Stat, Step, Testimonial, TestimonialsFields,
};
use super::{ContentSection, SectionKind, SectionMetadata};
use crate::types::SectionId;

fn s(value: &str) -> Option<String> {
    Some(value.to_owned())
}

fn feature(title: &str, description: &str, icon: &str) -> Feature {
    Feature {
        title: title.to_owned(),
        description: description.to_owned(),
        icon: icon.to_owned(),
    }
}

fn partner(name: &str, logo: &str) -> Partner {
    Partner {
        name: name.to_owned(),
        logo: logo.to_owned(),
    }
}

fn links(items: &[(&str, &str)]) -> Vec<Link> {
    items
        .iter()
        .map(|(name, href)| Link::new(name, href))
        .collect()
}

#[must_use]
pub fn header_block() -> HeaderFields {
    HeaderFields {
        site_name: s("BikesDeal"),
        navigation_items: Some(links(&[
            ("Hero Section", "#hero"),
            ("Services", "#services"),
            ("Bikes for Sale", "#bikes"),
            ("Testimonials", "#testimonials"),
            ("Partners", "#partners"),
            ("Contact Info", "#contact"),
            ("How It Works", "#how-it-works"),
        ])),
        cta_button_text: s("Sell Now"),
    }
}

#[must_use]
pub fn hero_block() -> HeroFields {
    HeroFields {
        banner_title: s("Just Instant Payment"),
        banner_subtitle: s("in 30 MINUTES"),
        main_title: s("BikesDeal"),
        description: s(
            "Your trusted partner for buying and selling premium motorcycles. Experience the fastest and most secure bike dealing platform.",
        ),
        primary_button_text: s("Sell Your Bike Now"),
    }
}

#[must_use]
pub fn services_block() -> ServicesFields {
    ServicesFields {
        title: s("Our Services"),
        description: s(
            "We provide comprehensive motorcycle dealing services with a focus on speed, security, and customer satisfaction.",
        ),
        services: Some(vec![
            feature(
                "Quick Bike Sale",
                "Sell your motorcycle in just 30 minutes with our streamlined process. Get instant evaluation and immediate payment.",
                "clock",
            ),
            feature(
                "Premium Bike Purchase",
                "Browse our curated collection of premium motorcycles. All bikes are thoroughly inspected and certified.",
                "shopping-cart",
            ),
            feature(
                "Fair Market Pricing",
                "Get the best value for your motorcycle with our AI-powered pricing system based on real market data.",
                "dollar-sign",
            ),
            feature(
                "Secure Transactions",
                "All transactions are protected with bank-level security. Your money and documents are always safe.",
                "shield",
            ),
            feature(
                "Expert Support",
                "24/7 customer support from motorcycle experts. Get help whenever you need it.",
                "users",
            ),
            feature(
                "Quality Guarantee",
                "Every motorcycle comes with our quality guarantee. Buy with confidence knowing you're protected.",
                "award",
            ),
        ]),
        cta_button_text: s("Learn More About Our Services"),
    }
}

fn step(title: &str, description: &str, icon: &str, time: &str) -> Step {
    Step {
        title: title.to_owned(),
        description: description.to_owned(),
        icon: icon.to_owned(),
        time: time.to_owned(),
    }
}

fn faq(question: &str, answer: &str) -> Faq {
    Faq {
        question: question.to_owned(),
        answer: answer.to_owned(),
    }
}

#[must_use]
pub fn how_it_works_block() -> HowItWorksFields {
    HowItWorksFields {
        title: s("How It Works"),
        description: s(
            "Selling your motorcycle has never been easier. Follow our simple 6-step process and get paid in just 30 minutes.",
        ),
        steps: Some(vec![
            step(
                "Submit Details",
                "Fill out our simple form with your bike details and contact information.",
                "phone",
                "2 minutes",
            ),
            step(
                "Schedule Inspection",
                "Our expert will contact you to schedule a free inspection at your location.",
                "calendar",
                "Within 2 hours",
            ),
            step(
                "Professional Evaluation",
                "Thorough inspection and fair market valuation by certified professionals.",
                "search",
                "15 minutes",
            ),
            step(
                "Documentation",
                "We handle all paperwork including RC transfer and legal formalities.",
                "file-text",
                "10 minutes",
            ),
            step(
                "Instant Payment",
                "Receive payment directly to your bank account within 30 minutes.",
                "credit-card",
                "30 minutes",
            ),
            step(
                "Deal Complete",
                "Your bike is sold! Enjoy hassle-free experience and instant cash.",
                "check-circle",
                "Done!",
            ),
        ]),
        features: Some(vec![
            feature(
                "Free Home Inspection",
                "Our experts come to your location for bike evaluation at no cost.",
                "home",
            ),
            feature(
                "Fair Market Price",
                "Get the best price based on current market conditions and bike condition.",
                "money",
            ),
            feature(
                "Instant Documentation",
                "All legal paperwork handled by our team with government compliance.",
                "clipboard",
            ),
            feature(
                "24/7 Support",
                "Round-the-clock customer support for any queries or assistance.",
                "headphones",
            ),
        ]),
        faqs: Some(vec![
            faq(
                "Is the inspection really free?",
                "Yes, absolutely! We provide free bike inspection at your location with no hidden charges.",
            ),
            faq(
                "How do you determine the bike price?",
                "Our experts use market data, bike condition, and current demand to provide fair valuations.",
            ),
            faq(
                "What documents do I need?",
                "RC, insurance papers, and PUC certificate. We help with any missing documentation.",
            ),
            faq(
                "Is the payment really instant?",
                "Yes! Once the deal is finalized, payment is transferred to your account within 30 minutes.",
            ),
        ]),
    }
}

fn testimonial(name: &str, location: &str, text: &str, bike: &str, avatar: &str) -> Testimonial {
    Testimonial {
        name: name.to_owned(),
        location: location.to_owned(),
        rating: 5,
        text: text.to_owned(),
        bike: bike.to_owned(),
        avatar: avatar.to_owned(),
    }
}

fn stat(value: &str, label: &str) -> Stat {
    Stat {
        value: value.to_owned(),
        label: label.to_owned(),
    }
}

#[must_use]
pub fn testimonials_block() -> TestimonialsFields {
    TestimonialsFields {
        section_title: s("What Our Customers Say"),
        section_subtitle: s(
            "Don't just take our word for it. Here's what our satisfied customers have to say about their experience with BikesDeal.",
        ),
        testimonials: Some(vec![
            testimonial(
                "Rajesh Kumar",
                "Mumbai, Maharashtra",
                "Sold my Royal Enfield within 2 hours of listing! The payment was instant and the process was incredibly smooth. Highly recommended!",
                "Royal Enfield Classic 350",
                "RK",
            ),
            testimonial(
                "Priya Sharma",
                "Delhi, NCR",
                "Best bike dealing platform I have ever used. The team was professional and the valuation was fair. Got paid in exactly 30 minutes!",
                "Honda CB Shine",
                "PS",
            ),
            testimonial(
                "Amit Patel",
                "Ahmedabad, Gujarat",
                "Amazing service! They handled all the paperwork and the inspection was thorough. Will definitely use BikesDeal again.",
                "Bajaj Pulsar 220F",
                "AP",
            ),
            testimonial(
                "Sneha Reddy",
                "Hyderabad, Telangana",
                "Professional team, quick service, and transparent pricing. Sold my Activa at a great price with zero hassle.",
                "Honda Activa 6G",
                "SR",
            ),
            testimonial(
                "Vikram Singh",
                "Jaipur, Rajasthan",
                "The fastest bike selling experience ever! From listing to payment, everything was completed in under an hour.",
                "KTM Duke 390",
                "VS",
            ),
            testimonial(
                "Deepika Nair",
                "Kochi, Kerala",
                "Excellent customer service and fair pricing. The team was very helpful throughout the entire process.",
                "TVS Jupiter",
                "DN",
            ),
        ]),
        stats: Some(vec![
            stat("10,000+", "Bikes Sold"),
            stat("4.9/5", "Customer Rating"),
            stat("30 Min", "Average Payment Time"),
            stat("50+", "Cities Covered"),
        ]),
    }
}

#[must_use]
pub fn partners_block() -> PartnersFields {
    PartnersFields {
        title: s("Our Partners"),
        content: s(
            "We work with leading motorcycle brands and financial institutions to provide you with the best service and instant payments.",
        ),
        brands_title: s("Motorcycle Brands We Deal With"),
        partners: Some(vec![
            partner("Honda", "HONDA"),
            partner("Yamaha", "YAMAHA"),
            partner("Bajaj", "BAJAJ"),
            partner("TVS", "TVS"),
            partner("Hero", "HERO"),
            partner("Royal Enfield", "RE"),
            partner("KTM", "KTM"),
            partner("Suzuki", "SUZUKI"),
            partner("Kawasaki", "KAWASAKI"),
            partner("Ducati", "DUCATI"),
            partner("BMW", "BMW"),
            partner("Harley Davidson", "HD"),
        ]),
        banking_title: s("Banking Partners for Instant Payments"),
        bank_partners: Some(vec![
            partner("State Bank of India", "SBI"),
            partner("HDFC Bank", "HDFC"),
            partner("ICICI Bank", "ICICI"),
            partner("Axis Bank", "AXIS"),
            partner("Kotak Bank", "KOTAK"),
            partner("Punjab National Bank", "PNB"),
        ]),
        benefits_title: s("Why Our Partnerships Matter"),
        partner_benefits: Some(vec![
            feature(
                "Authentic Valuations",
                "Our brand partnerships ensure accurate market valuations for all motorcycle models.",
                "check",
            ),
            feature(
                "Instant Payments",
                "Banking partnerships enable secure and instant money transfers within 30 minutes.",
                "money",
            ),
            feature(
                "Secure Transactions",
                "All transactions are protected by bank-level security and insurance coverage.",
                "shield",
            ),
        ]),
        cta_button_text: s("Become a Partner"),
    }
}

fn contact_info(title: &str, details: &[&str]) -> ContactInfoItem {
    ContactInfoItem {
        title: title.to_owned(),
        details: details.iter().map(|d| (*d).to_owned()).collect(),
    }
}

#[must_use]
pub fn contact_block() -> ContactFields {
    ContactFields {
        title: s("Contact Us"),
        content: s(
            "Have questions or need assistance? Our team is here to help you with any inquiries about selling or buying bikes.",
        ),
        form_title: s("Send Us a Message"),
        success_message: s("Thank you! Your message has been sent successfully."),
        contact_info_title: s("Contact Information"),
        contact_info: Some(vec![
            contact_info("Phone", &["+91-9876543210", "+91-9876543211"]),
            contact_info("Email", &["info@bikesdeal.com", "support@bikesdeal.com"]),
            contact_info("Address", &["BikesDeal HQ", "123 Bike Street, Mumbai, 400001"]),
            contact_info("Working Hours", &["Mon–Sat: 9AM–8PM", "Sun: 10AM–5PM"]),
        ]),
    }
}

#[must_use]
pub fn footer_block() -> FooterFields {
    FooterFields {
        company_name: s("BikesDeal"),
        company_description: s(
            "India's most trusted platform for buying and selling pre-owned motorcycles. Get the best value for your bike with our transparent and hassle-free process.",
        ),
        phone: s("+91-9876543210"),
        email: s("info@bikesdeal.com"),
        address: s("123 Bike Street, Mumbai, 400001"),
        newsletter_title: s("Stay Updated"),
        newsletter_description: s("Subscribe to get the latest news and offers"),
        subscribe_button_text: s("Subscribe"),
        copyright: s("© 2025 BikesDeal. All rights reserved. | Made with ❤️ in India"),
        footer_links: Some(FooterLinks {
            company: links(&[
                ("About Us", "#about"),
                ("How It Works", "#how-it-works"),
                ("Our Services", "#services"),
                ("Careers", "#careers"),
                ("Press", "#press"),
            ]),
            services: links(&[
                ("Sell Your Bike", "#sell"),
                ("Buy Bikes", "#buy"),
                ("Bike Valuation", "#valuation"),
                ("Home Inspection", "#inspection"),
                ("Documentation", "#docs"),
            ]),
            support: links(&[
                ("Help Center", "#help"),
                ("Contact Us", "#contact"),
                ("FAQ", "#faq"),
                ("Live Chat", "#chat"),
                ("Report Issue", "#report"),
            ]),
            legal: links(&[
                ("Privacy Policy", "#privacy"),
                ("Terms of Service", "#terms"),
                ("Cookie Policy", "#cookies"),
                ("Refund Policy", "#refund"),
                ("Disclaimer", "#disclaimer"),
            ]),
        }),
        social_links: Some(links(&[
            ("Facebook", "#"),
            ("Twitter", "#"),
            ("Instagram", "#"),
            ("Youtube", "#"),
        ])),
    }
}

fn seeded(
    kind: SectionKind,
    title: &str,
    content: &str,
    order: i64,
    fields: SectionFields,
) -> ContentSection {
    ContentSection {
        title: title.to_owned(),
        content: content.to_owned(),
        description: Some(format!("{title} section content")),
        order,
        fields: Some(fields),
        ..ContentSection::blank(SectionId::new(kind.canonical_id()))
    }
}

/// The collection written to storage on first load and by a reset.
///
/// Seeded sections carry only the overrides an editor is most likely to
/// touch; everything else resolves from the `*_block` defaults.
#[must_use]
pub fn default_sections() -> Vec<ContentSection> {
    let mut hero = seeded(
        SectionKind::Hero,
        "Hero Section",
        "Find Your Perfect Ride Today",
        1,
        SectionFields::Hero(HeroFields::default()),
    );
    hero.metadata = Some(SectionMetadata {
        background_color: s("#dc2626"),
        text_color: s("#ffffff"),
        ..SectionMetadata::default()
    });

    vec![
        seeded(
            SectionKind::Header,
            "Header",
            "Header navigation and branding",
            0,
            SectionFields::Header(HeaderFields {
                site_name: s("BikesDeal"),
                navigation_items: Some(links(&[
                    ("Hero Section", "#hero"),
                    ("Services", "#services"),
                    ("Testimonials", "#testimonials"),
                    ("Partners", "#partners"),
                    ("Contact Info", "#contact"),
                    ("How It Works", "#how-it-works"),
                ])),
                cta_button_text: s("Sell Now"),
            }),
        ),
        hero,
        seeded(
            SectionKind::Services,
            "Services",
            "We provide comprehensive bike buying and selling services",
            2,
            SectionFields::Services(ServicesFields::default()),
        ),
        seeded(
            SectionKind::HowItWorks,
            "How It Works",
            "Sell your bike in six simple steps",
            3,
            SectionFields::HowItWorks(HowItWorksFields::default()),
        ),
        seeded(
            SectionKind::Testimonials,
            "Testimonials",
            "Customer testimonials and reviews",
            4,
            SectionFields::Testimonials(TestimonialsFields {
                section_title: s("What Our Customers Say"),
                section_subtitle: s("Real experiences from satisfied customers"),
                ..TestimonialsFields::default()
            }),
        ),
        seeded(
            SectionKind::Partners,
            "Partners",
            "Our trusted partners and collaborators",
            5,
            SectionFields::Partners(PartnersFields {
                title: s("Our Partners"),
                content: s(
                    "We work with leading brands and financial institutions to provide you the best service",
                ),
                benefits_title: s("Partnership Benefits"),
                cta_button_text: s("Become a Partner"),
                ..PartnersFields::default()
            }),
        ),
        seeded(
            SectionKind::Contact,
            "Contact",
            "Get in touch with our team",
            6,
            SectionFields::Contact(ContactFields::default()),
        ),
        seeded(
            SectionKind::Footer,
            "Footer",
            "Footer information and links",
            100,
            SectionFields::Footer(FooterFields {
                company_name: s("BikesDeal"),
                phone: s("+91-9876543210"),
                email: s("info@bikesdeal.com"),
                address: s("123 Bike Street, Mumbai, 400001"),
                copyright: s("© 2025 BikesDeal. All rights reserved. | Made with ❤️ in India"),
                ..FooterFields::default()
            }),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sections_cover_every_block_once() {
        let sections = default_sections();
        for kind in SectionKind::ALL {
            let matching = sections
                .iter()
                .filter(|s| s.id == kind.canonical_id())
                .count();
            assert_eq!(matching, 1, "{kind:?}");
        }
    }

    #[test]
    fn test_default_section_fields_match_their_kind() {
        for section in default_sections() {
            let kind = section.fields.as_ref().and_then(SectionFields::kind);
            assert_eq!(kind, SectionKind::for_section_id(section.id.as_str()));
        }
    }

    #[test]
    fn test_blocks_are_fully_populated() {
        let hero = hero_block();
        assert!(hero.banner_title.is_some() && hero.primary_button_text.is_some());
        assert_eq!(services_block().services.map(|s| s.len()), Some(6));
        assert_eq!(how_it_works_block().steps.map(|s| s.len()), Some(6));
        assert_eq!(testimonials_block().testimonials.map(|t| t.len()), Some(6));
        assert_eq!(partners_block().bank_partners.map(|p| p.len()), Some(6));
        assert!(footer_block().footer_links.is_some_and(|l| l.legal.len() == 5));
    }
}
