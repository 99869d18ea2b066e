//! Pre-filled WhatsApp messages for reservations and hotel enquiries.
//!
//! The hand-off is one-way: a link is built and opened, nothing comes back.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const RESERVATIONS_PHONE: &str = "51958100066";

pub const CONTACT_MESSAGE: &str = "Hola! Me interesa conocer más sobre los servicios de Hotel Paraiso. ¿Podrían brindarme más información?";

/// Characters `encodeURIComponent` leaves as they are.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum City {
    Chiclayo,
    Trujillo,
    Piura,
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            City::Chiclayo => "CHICLAYO",
            City::Trujillo => "TRUJILLO",
            City::Piura => "PIURA",
        };
        f.write_str(name)
    }
}

impl FromStr for City {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CHICLAYO" => Ok(City::Chiclayo),
            "TRUJILLO" => Ok(City::Trujillo),
            "PIURA" => Ok(City::Piura),
            other => Err(format!("unknown city {other:?}, expected chiclayo, trujillo or piura")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub adults: u8,
    pub children: u8,
    pub rooms: u8,
    pub city: Option<City>,
}

impl Reservation {
    /// The form's initial values: two nights from `today`, two adults, one child, one room.
    pub fn starting(today: NaiveDate) -> Self {
        Reservation {
            check_in: Some(today),
            check_out: today.checked_add_days(Days::new(2)),
            adults: 2,
            children: 1,
            rooms: 1,
            city: Some(City::Chiclayo),
        }
    }

    pub fn message(&self) -> String {
        let city = self
            .city
            .map_or_else(|| NOT_SELECTED.to_string(), |city| city.to_string());
        format!(
            "Hola! Me gustaría hacer una reserva con los siguientes datos:\n\
             \n\
             📅 Check-in: {}\n\
             📅 Check-out: {}\n\
             👥 Adultos: {}\n\
             👶 Niños: {}\n\
             🛏️ Habitaciones: {}\n\
             📍 Ciudad: {}\n\
             \n\
             ¿Podrían ayudarme con la disponibilidad y precios?\n\
             \n\
             Saludos!",
            format_date(self.check_in),
            format_date(self.check_out),
            adults_label(self.adults),
            children_label(self.children),
            rooms_label(self.rooms),
            city,
        )
    }
}

const NOT_SELECTED: &str = "No seleccionada";

fn format_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(
        || NOT_SELECTED.to_string(),
        |date| date.format("%d-%m-%Y").to_string(),
    )
}

fn adults_label(adults: u8) -> String {
    match adults {
        1 => "1 ADULTO".to_string(),
        n => format!("{n} ADULTOS"),
    }
}

fn children_label(children: u8) -> String {
    match children {
        1 => "1 NIÑO".to_string(),
        n => format!("{n} NIÑOS"),
    }
}

fn rooms_label(rooms: u8) -> String {
    format!("{rooms:02} HAB")
}

/// Message sent from a hotel's showcase card.
pub fn hotel_enquiry(hotel: &str) -> String {
    format!(
        "Hola! Me interesa hacer una reserva en el Hotel Paraíso {hotel}. ¿Podrían proporcionarme información sobre disponibilidad, precios y servicios?\n\nGracias!"
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// `wa.me`, opens the app on phones.
    App,
    /// WhatsApp Web.
    Web,
}

pub fn whatsapp_link(phone: &str, message: &str, channel: Channel) -> String {
    let text = utf8_percent_encode(message, URI_COMPONENT);
    match channel {
        Channel::App => format!("https://wa.me/{phone}?text={text}"),
        Channel::Web => format!("https://web.whatsapp.com/send?phone={phone}&text={text}"),
    }
}
