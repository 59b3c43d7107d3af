fn main() {
    ems_frontend::start_app();
}
