use std::{thread, time::Duration};

use anyhow::Error;
use tinyform::{FormHandler, FormServer, PageBuilder, ServiceOutcome};
use tinyform_mio::TcpServer;
use tracing::{event, Level};

fn main() -> Result<(), Error> {
    devutils::init_logging();

    let mut server = FormServer::new(DeviceSettings::default());
    server.set_title("Device Setup");
    server.bind(TcpServer::bind("127.0.0.1:8000".parse()?)?);

    event!(Level::INFO, "open http://127.0.0.1:8000/ in a browser");

    loop {
        if server.service()? == ServiceOutcome::SubmissionComplete {
            // A real device persists the settings in receive_value and
            // restarts here; the demo just exits
            event!(Level::INFO, "settings saved, shutting down");
            return Ok(());
        }

        thread::sleep(Duration::from_millis(25));
    }
}

#[derive(Default)]
struct DeviceSettings {
    ssid: String,
    password: String,
}

impl FormHandler for DeviceSettings {
    fn build_form(&mut self, page: &mut PageBuilder<'_>) {
        page.add_subheading("Network");
        page.add_text("SSID", &self.ssid);
        page.add_text("Password", &self.password);
        page.add_drop_down("Mode", "Station,Access Point", 0, true)
            .unwrap();
        page.add_drop_down_range("Channel", 1, 13, 6);

        page.add_subheading("Status LED");
        page.add_color_picker("LED color", 0x2563EB);
        page.add_drop_down_range("Brightness", 0, 100, 75);
    }

    fn receive_value(&mut self, ordinal: usize, value: &str) {
        event!(Level::INFO, ordinal, value, "received");

        match ordinal {
            1 => self.ssid = value.to_string(),
            2 => self.password = value.to_string(),
            _ => {}
        }
    }
}
