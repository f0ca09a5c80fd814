use std::{
    cell::RefCell,
    io::{Read, Write},
    net::{Shutdown, SocketAddr, TcpStream},
    rc::Rc,
    thread,
    time::{Duration, Instant},
};

use garden_weather_node::{
    configuration::MonitorConfig,
    request_handler::{Notifier, RequestHandler, RAIN_NOTIFICATION},
    scaler::Bounds,
    sensors::{
        moisture_sensor::MoistureSensor, raindrop_sensor::RaindropSensor,
        sensor::TemperatureSensor, SensorSource, Sensors,
    },
    server::{Listener, PollOutcome, Server, TcpClientListener},
    MonitorError,
};

struct FixedTemperature(f32);

impl TemperatureSensor for FixedTemperature {
    fn get_temp_c(&mut self) -> f32 {
        self.0
    }
}

#[derive(Clone, Default)]
struct SharedNotifier(Rc<RefCell<Vec<String>>>);

impl Notifier for SharedNotifier {
    fn notify(&mut self, content: &str) {
        self.0.borrow_mut().push(content.to_string());
    }
}

fn serve_until_client<L: Listener, S: SensorSource, N: Notifier>(
    server: &mut Server<L, S, N>,
) -> PollOutcome {
    for _ in 0..500 {
        match server.poll_once().unwrap() {
            PollOutcome::NoClient => thread::sleep(Duration::from_millis(10)),
            outcome => return outcome,
        }
    }
    panic!("no client connected");
}

fn build_server(
    raindrop_raw: i32,
    notifier: SharedNotifier,
) -> (
    Server<TcpClientListener, impl SensorSource, SharedNotifier>,
    SocketAddr,
) {
    build_server_with_timeout(raindrop_raw, notifier, Duration::from_secs(2))
}

fn build_server_with_timeout(
    raindrop_raw: i32,
    notifier: SharedNotifier,
    read_timeout: Duration,
) -> (
    Server<TcpClientListener, impl SensorSource, SharedNotifier>,
    SocketAddr,
) {
    let config = MonitorConfig::default();
    let listener = TcpClientListener::bind("127.0.0.1:0", read_timeout).unwrap();
    let addr = listener.local_addr().unwrap();

    let sensors = Sensors::new(
        FixedTemperature(21.5),
        MoistureSensor::new(|| 350, config.moisture_bounds),
        RaindropSensor::new(
            move || raindrop_raw,
            Bounds::new(0, 1024).unwrap(),
            config.rain_threshold,
        ),
    );

    (
        Server::new(listener, sensors, RequestHandler::new(notifier), &config),
        addr,
    )
}

#[test]
fn line_feed_request_gets_one_json_response() {
    let notifier = SharedNotifier::default();
    let (mut server, addr) = build_server(0, notifier.clone());

    let client = thread::spawn(move || {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(b"GET / HTTP/1.1\n").unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();
        response
    });

    let outcome = serve_until_client(&mut server);
    let response = client.join().unwrap();

    assert!(matches!(outcome, PollOutcome::Served(_)));
    assert_eq!(response.matches("HTTP/1.1 200 OK").count(), 1);

    let (head, body) = response.split_once("\r\n\r\n").unwrap();
    assert_eq!(
        head,
        "HTTP/1.1 200 OK\r\n\
         Content-Type: application/json\r\n\
         Access-Control-Allow-Origin: *\r\n\
         Connection: close"
    );
    assert_eq!(
        body,
        "{\"temperatureC\":21.5,\"temperatureF\":70.7,\"moisture\":50,\"raindrop\":1}\r\n"
    );

    let json: serde_json::Value = serde_json::from_str(body.trim_end()).unwrap();
    assert!(json["temperatureC"].is_number());
    assert!(json["temperatureF"].is_number());
    assert!(json["moisture"].is_i64());
    assert!(json["raindrop"].is_i64());

    assert!(notifier.0.borrow().is_empty());
}

#[test]
fn client_hanging_up_early_gets_nothing() {
    let notifier = SharedNotifier::default();
    let (mut server, addr) = build_server(0, notifier);

    let client = thread::spawn(move || {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(b"GET /").unwrap();
        stream.shutdown(Shutdown::Write).unwrap();

        let mut response = Vec::new();
        let _ = stream.read_to_end(&mut response);
        response
    });

    let outcome = serve_until_client(&mut server);

    assert!(matches!(
        outcome,
        PollOutcome::ClientFailed(MonitorError::ConnectionClosedPrematurely)
    ));
    assert!(client.join().unwrap().is_empty());
}

#[test]
fn rain_is_notified_after_the_response() {
    let notifier = SharedNotifier::default();
    let (mut server, addr) = build_server(900, notifier.clone());

    let client = thread::spawn(move || {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(b"\n").unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();
        response
    });

    serve_until_client(&mut server);
    let response = client.join().unwrap();

    assert!(response.contains("\"raindrop\":88"));
    assert!(!response.contains(RAIN_NOTIFICATION));
    assert_eq!(*notifier.0.borrow(), vec![RAIN_NOTIFICATION.to_string()]);
}

#[test]
fn full_request_with_headers_is_answered_completely() {
    let (mut server, addr) = build_server(0, SharedNotifier::default());

    let client = thread::spawn(move || {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream
            .write_all(b"GET / HTTP/1.1\r\nHost: node\r\nAccept: */*\r\n\r\n")
            .unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();
        response
    });

    let outcome = serve_until_client(&mut server);
    let response = client.join().unwrap();

    assert!(matches!(outcome, PollOutcome::Served(_)));
    assert!(response.ends_with(
        "\r\n\r\n{\"temperatureC\":21.5,\"temperatureF\":70.7,\"moisture\":50,\"raindrop\":1}\r\n"
    ));
}

#[test]
fn silent_client_times_out() {
    let notifier = SharedNotifier::default();
    let (mut server, addr) =
        build_server_with_timeout(900, notifier.clone(), Duration::from_millis(100));

    let client = thread::spawn(move || {
        let stream = TcpStream::connect(addr).unwrap();
        thread::sleep(Duration::from_millis(1500));
        drop(stream);
    });

    let started = Instant::now();
    let outcome = serve_until_client(&mut server);
    let elapsed = started.elapsed();

    assert!(matches!(
        outcome,
        PollOutcome::ClientFailed(MonitorError::Io(_))
    ));
    assert!(elapsed < Duration::from_millis(1000), "took {elapsed:?}");
    assert_eq!(*notifier.0.borrow(), vec![RAIN_NOTIFICATION.to_string()]);

    client.join().unwrap();
}
