fn main() {
    bankline_frontend::run();
}
