fn main() {
    ar_shooter::game::run();
}
