use chrono::{Local, NaiveDate};
use clap::Parser;
use paraiso_feed::handoff::{
    hotel_enquiry, whatsapp_link, Channel, City, Reservation, CONTACT_MESSAGE, RESERVATIONS_PHONE,
};

#[derive(Parser, Debug)]
struct Args {
    /// Check-in date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    check_in: Option<NaiveDate>,

    /// Check-out date (YYYY-MM-DD). Defaults to two days after today.
    #[arg(long)]
    check_out: Option<NaiveDate>,

    #[arg(long, default_value_t = 2)]
    adults: u8,

    /// Children up to 12 years old
    #[arg(long, default_value_t = 1)]
    children: u8,

    #[arg(long, default_value_t = 1)]
    rooms: u8,

    /// chiclayo, trujillo or piura
    #[arg(long, default_value = "chiclayo")]
    city: City,

    /// Ask about one hotel instead of sending reservation details
    #[arg(long)]
    hotel: Option<String>,

    /// Send the general contact message
    #[arg(long, conflicts_with = "hotel")]
    contact: bool,

    /// Link to WhatsApp Web instead of the app
    #[arg(long)]
    web: bool,

    #[arg(long, default_value = RESERVATIONS_PHONE)]
    phone: String,
}

fn main() {
    let args = Args::parse();

    let message = match &args.hotel {
        Some(hotel) => hotel_enquiry(hotel),
        None if args.contact => CONTACT_MESSAGE.to_string(),
        None => {
            let defaults = Reservation::starting(Local::now().date_naive());
            Reservation {
                check_in: args.check_in.or(defaults.check_in),
                check_out: args.check_out.or(defaults.check_out),
                adults: args.adults,
                children: args.children,
                rooms: args.rooms,
                city: Some(args.city),
            }
            .message()
        }
    };

    let channel = if args.web { Channel::Web } else { Channel::App };

    println!("{message}\n");
    println!("{}", whatsapp_link(&args.phone, &message, channel));
}
